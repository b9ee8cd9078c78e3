use serde::{Deserialize, Serialize};

/// Session token values recognized by the reveal screen. Anything else is
/// treated as absent.
pub const TOKEN_MALE: &str = "male";
pub const TOKEN_FEMALE: &str = "female";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderChoice {
    Male,
    Female,
}

impl GenderChoice {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            TOKEN_MALE => Some(Self::Male),
            TOKEN_FEMALE => Some(Self::Female),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Male => TOKEN_MALE,
            Self::Female => TOKEN_FEMALE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealText {
    pub greeting: &'static str,
    pub message: &'static str,
}

/// Display text for the reveal screen. The engines never look at the
/// choice; only this lookup does, exactly once per reveal.
pub fn reveal_text(choice: Option<GenderChoice>) -> RevealText {
    match choice {
        Some(GenderChoice::Male) => RevealText {
            greeting: "Raasa!",
            message: "Eley Ne Mama Va aaita dey",
        },
        Some(GenderChoice::Female) => RevealText {
            greeting: "Raasathi!",
            message: "Ne Aththai uh aaita pa",
        },
        None => RevealText {
            greeting: "Friends!",
            message: "Deii Ne Mama va aaita da",
        },
    }
}
