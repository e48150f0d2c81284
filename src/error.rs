use thiserror::Error;

/// Recoverable rejections of user/world actions. None of these abort the
/// simulation; the caller surfaces the reason and nothing is mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("too many pets: the population cap is {cap}")]
    PopulationFull { cap: usize },

    #[error("no food stored - catch a ball first")]
    NoFood,

    #[error("health is already full")]
    HealthFull,

    #[error("no such pet")]
    UnknownPet,
}
