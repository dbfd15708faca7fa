pub mod starting;
