pub mod entities;

pub use entities::{Admin, AdminModel, Country, CountryModel, Learner, LearnerModel};
pub use entities::{AdminResponseDto, CountryResponseDto, LearnerResponseDto};
