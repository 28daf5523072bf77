// Adapters layer: concrete implementations for external systems (volby.cz pages over HTTP).

pub mod html;
pub mod http;
