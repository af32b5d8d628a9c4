// Application layer: CLI command dispatch and output on top of the client.

pub mod commands;
