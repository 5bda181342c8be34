//! Subsystem document fixtures shared by the integration tests

#![allow(dead_code)]

pub const PROCESS_ENGINES_ELEMENT_ONLY: &str =
    include_str!("../fixtures/subsystem_with_process_engines_element_only.xml");
pub const SINGLE_ENGINE: &str = include_str!("../fixtures/subsystem_with_single_engine.xml");
pub const ENGINES: &str = include_str!("../fixtures/subsystem_with_engines.xml");
pub const ENGINES_AND_PROPERTIES: &str =
    include_str!("../fixtures/subsystem_with_engines_and_properties.xml");
pub const DUPLICATE_ENGINE_NAMES: &str =
    include_str!("../fixtures/subsystem_with_duplicate_engine_names.xml");
pub const JOB_EXECUTOR: &str = include_str!("../fixtures/subsystem_with_job_executor.xml");
pub const JOB_EXECUTOR_AND_PROPERTIES: &str =
    include_str!("../fixtures/subsystem_with_job_executor_and_properties.xml");
pub const PROCESS_ENGINES_AND_JOB_EXECUTOR: &str =
    include_str!("../fixtures/subsystem_with_process_engines_and_job_executor.xml");
pub const JOB_EXECUTOR_FIRST: &str =
    include_str!("../fixtures/subsystem_with_job_executor_first.xml");

/// Every fixture that installs cleanly, with its name
pub fn installable() -> Vec<(&'static str, &'static str)> {
    vec![
        ("process_engines_element_only", PROCESS_ENGINES_ELEMENT_ONLY),
        ("single_engine", SINGLE_ENGINE),
        ("engines", ENGINES),
        ("engines_and_properties", ENGINES_AND_PROPERTIES),
        ("job_executor", JOB_EXECUTOR),
        ("job_executor_and_properties", JOB_EXECUTOR_AND_PROPERTIES),
        ("process_engines_and_job_executor", PROCESS_ENGINES_AND_JOB_EXECUTOR),
        ("job_executor_first", JOB_EXECUTOR_FIRST),
    ]
}
