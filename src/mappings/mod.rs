mod key_codes;

pub use key_codes::{KeyCodes, MouseButtonNames};
