mod session_state_repo;

pub use session_state_repo::DieselSessionStateRepository;
