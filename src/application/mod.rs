pub mod chain_service;
