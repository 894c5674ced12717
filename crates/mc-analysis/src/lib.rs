//! Consistency analysis of mapping trees.
//!
//! The [`Analyzer`] inspects one release's [`MappingTree`](mc_mappings::MappingTree)
//! and reports naming defects as [`Problem`]s. Each problem may carry a
//! [`Resolution`] that is only applied on request, so an analysis can be
//! audited before it changes anything.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Analyzer::analyze(tree)                                         │
//! │    - config namespaces resolved once per tree                    │
//! │    - one ClassVisit per class (modifiers, supertypes, detached)  │
//! │    - InheritanceResolver for supertype closures                  │
//! └──────────────────────────────────────────────────────────────────┘
//!                              │ Vec<Problem>
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Problem { kind, element, message, resolution }                  │
//! │    - ProblemReport: counts per kind, text, JSON                  │
//! │    - apply_all(problems, tree): Remove / Rename by source names  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Rules
//!
//! | kind                           | detection                                | resolution            |
//! |--------------------------------|------------------------------------------|-----------------------|
//! | `NON_EXISTENT_MAPPING`         | no parseable modifiers                   | remove                |
//! | `SYNTHETIC`                    | synthetic access bit                     | remove                |
//! | `INNER_CLASS_OWNER_NOT_MAPPED` | `a$b` unnamed, an owner named            | `{owner}${rest}`      |
//! | `INHERITANCE_ERROR`            | override named unlike its supertype      | supertype's name      |
//! | `SPECIAL_METHOD_NOT_MAPPED`    | `<init>`, `<clinit>`, enum accessors     | source name           |
//!
//! # Usage
//!
//! ```
//! use mc_analysis::{Analyzer, AnalyzerConfig, ProblemKind, apply_all};
//! use mc_mappings::{MODIFIERS_NAMESPACE, MappingTree};
//!
//! let mut tree = MappingTree::new("official", ["named", MODIFIERS_NAMESPACE]);
//! let modifiers = tree.namespace_id(MODIFIERS_NAMESPACE).unwrap();
//! tree.add_class("a").set_name(modifiers, "4097");
//!
//! let problems = Analyzer::new(AnalyzerConfig::default()).analyze(&tree);
//! assert_eq!(problems[0].kind, ProblemKind::Synthetic);
//!
//! apply_all(&problems, &mut tree).unwrap();
//! assert!(tree.class("a").is_none());
//! ```

mod analyzer;
mod config;
mod inheritance;
mod problem;
mod report;

pub use analyzer::{Analyzer, FixOutcome};
pub use config::AnalyzerConfig;
pub use inheritance::{Closure, InheritanceResolver};
pub use problem::{ElementPath, Problem, ProblemKind, Resolution, apply_all};
pub use report::ProblemReport;
