pub mod surface_json;

pub use surface_json::{compute_surface_json, SurfaceRequest, SurfaceResponse};
