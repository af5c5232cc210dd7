// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here is wrapped by `jwt_auth_middleware` via `route_layer`.

pub mod employees;
