pub mod coach;
pub mod console;
pub mod models;
pub mod odds;
pub mod predictions;

pub use console::{ConsoleModel, TeamForm};
pub use models::*;
pub use odds::{OddsEdits, OddsForm, OddsUpdate};
pub use predictions::{PredictionForm, PredictionSlot, SLOT_COUNT};
