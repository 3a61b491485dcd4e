//! Dispatch and logging tests against a recording host

mod dispatch_scenarios;
