//! Request handling logic shared by the handlers.

pub mod forward;
