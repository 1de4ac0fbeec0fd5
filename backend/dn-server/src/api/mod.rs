pub mod api_envelope;
pub mod connected_users_dto;
pub mod error;
pub mod sse_stats_dto;
pub mod stats;
