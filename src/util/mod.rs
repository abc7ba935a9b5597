//----------------------------------------
// util mod
//----------------------------------------
pub mod search;
