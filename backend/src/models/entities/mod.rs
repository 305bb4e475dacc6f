pub mod admin;
pub mod country;
pub mod learner;

pub use country::{Entity as Country, Model as CountryModel, ActiveModel as CountryActiveModel};
pub use country::{CreateCountryDto, UpdateCountryDto, CountryResponseDto};

pub use learner::{Entity as Learner, Model as LearnerModel, ActiveModel as LearnerActiveModel};
pub use learner::LearnerResponseDto;

pub use admin::{Entity as Admin, Model as AdminModel, ActiveModel as AdminActiveModel};
pub use admin::AdminResponseDto;
