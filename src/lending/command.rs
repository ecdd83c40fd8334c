pub mod cancel_hold_cmd;
pub mod place_on_hold_cmd;
