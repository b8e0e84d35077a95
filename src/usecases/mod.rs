//! Application use cases. Orchestrate domain logic via ports.

pub mod orchestrator;
pub mod plan_service;
pub mod response_parser;
pub mod template_engine;

pub use orchestrator::GenerationOrchestrator;
pub use plan_service::PlanService;
pub use response_parser::{ParseError, build_prompt, parse_schedule};
pub use template_engine::PlanTemplateEngine;
