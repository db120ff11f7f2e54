pub mod api_secret;

// Re-export commonly used items
pub use api_secret::api_secret_matches;
