//! HTTP integration tests driving the router against the in-memory store.

mod helpers;

mod auth_test;
mod billing_test;
mod cron_test;
mod job_test;
