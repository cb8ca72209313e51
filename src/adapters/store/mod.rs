pub mod json_log_store;
