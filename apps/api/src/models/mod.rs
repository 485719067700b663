pub mod portfolio;
pub mod skills;
