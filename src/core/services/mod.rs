pub mod access_coordinator;
pub mod audit_trail;
pub mod dispatch_queue;
pub mod id_allocator;
