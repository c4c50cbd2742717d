pub mod backend;
pub mod controller;
pub mod gst_backend;
