//! Rule-based consistency analysis of one mapping tree.
//!
//! Classes are visited independently. Everything a rule needs about the
//! visited class (modifiers, supertype closure, detachment) lives in a
//! `ClassVisit` owned by that visit, so classes can be analyzed in
//! parallel against a shared read-only `Context`.
//!
//! Per class, in order:
//!
//! 1. missing or synthetic modifiers: remove the class, skip its members
//! 2. nested class without a name: derive it from the nearest named owner
//! 3. fields: missing or synthetic modifiers
//! 4. methods: missing or synthetic modifiers, then either the special
//!    method rule or the inheritance rule

use std::collections::BTreeMap;

use mc_mappings::{
    Access, ClassRef, INNER_CLASS_SEPARATOR, MappingResult, MappingTree, Member, MethodRef,
    Version, descriptor,
};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    AnalyzerConfig, Closure, ElementPath, InheritanceResolver, Problem, ProblemKind, apply_all,
    config::TreeNamespaces,
};

const ENUM_VALUE_OF: (&str, &str) = ("valueOf", "(Ljava/lang/String;)");
const ENUM_VALUES: (&str, &str) = ("values", "()");

/// Read-only state shared by all class visits of one tree.
struct Context<'t> {
    tree: &'t MappingTree,
    resolver: InheritanceResolver<'t>,
    namespaces: TreeNamespaces<'t>,
}

impl<'t> Context<'t> {
    fn new(config: &AnalyzerConfig, tree: &'t MappingTree) -> Self {
        Self {
            tree,
            resolver: InheritanceResolver::new(tree),
            namespaces: TreeNamespaces::resolve(config, tree),
        }
    }

    /// Removal problem for an element whose modifiers say it does not
    /// belong in the tree.
    fn removal(
        &self,
        raw: Option<&str>,
        element: impl FnOnce() -> ElementPath,
    ) -> Option<Problem> {
        self.tree.modifiers_namespace()?;

        let (kind, message) = match raw {
            None => (
                ProblemKind::NonExistentMapping,
                "no modifiers recorded".to_owned(),
            ),
            Some(raw) => match Access::parse(raw) {
                None => (
                    ProblemKind::NonExistentMapping,
                    format!("unparseable modifiers {raw:?}"),
                ),
                Some(access) if access.is_synthetic() => {
                    (ProblemKind::Synthetic, format!("synthetic (modifiers {raw})"))
                }
                Some(_) => return None,
            },
        };
        Some(Problem::remove(kind, element(), message))
    }
}

/// Per-class analysis state.
struct ClassVisit<'t> {
    access: Option<Access>,
    supertypes: Vec<ClassRef<'t>>,
    /// No supertype resolves in the tree, so overrides cannot be checked.
    detached: bool,
}

impl<'t> ClassVisit<'t> {
    fn new(ctx: &Context<'t>, class: ClassRef<'t>) -> Self {
        let detached = ctx.resolver.is_detached(class);
        let supertypes = if detached {
            Vec::new()
        } else {
            ctx.resolver.supertypes(class, Closure::All)
        };
        Self {
            access: class.access(),
            supertypes,
            detached,
        }
    }

    fn is_enum(&self) -> bool {
        self.access.is_some_and(Access::is_enum)
    }

    /// Methods whose names are fixed by the JVM.
    fn is_special(&self, method: MethodRef<'t>) -> bool {
        if method.is_constructor() || method.is_static_initializer() {
            return true;
        }
        if !self.is_enum() {
            return false;
        }
        let signature = (method.src_name(), descriptor::parameters(method.src_desc()));
        signature == ENUM_VALUE_OF || signature == ENUM_VALUES
    }
}

fn is_private(access: Option<Access>) -> bool {
    access.is_some_and(Access::is_private)
}

/// Applies the analysis rules to mapping trees.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

/// Result of [`Analyzer::fix_until_stable`].
#[derive(Debug, Clone, Default)]
pub struct FixOutcome {
    /// Analyze-and-apply passes that changed the tree.
    pub passes: usize,
    /// Resolutions applied over all passes.
    pub applied: usize,
    /// Problems of the final analysis.
    pub remaining: Vec<Problem>,
}

impl FixOutcome {
    /// Whether the final analysis found nothing left to resolve.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        !self.remaining.iter().any(Problem::is_resolvable)
    }
}

impl Analyzer {
    #[must_use]
    pub const fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Analyze every class of `tree`, in class order.
    #[must_use]
    pub fn analyze(&self, tree: &MappingTree) -> Vec<Problem> {
        let ctx = Context::new(&self.config, tree);
        let problems: Vec<_> = tree
            .classes()
            .flat_map(|class| self.visit_class(&ctx, class))
            .collect();

        debug!("analyzed {} classes: {} problems", tree.len(), problems.len());
        problems
    }

    /// Like [`analyze`](Self::analyze), visiting classes in parallel.
    ///
    /// The result is in the same order as the sequential analysis.
    #[must_use]
    pub fn analyze_parallel(&self, tree: &MappingTree) -> Vec<Problem> {
        let ctx = Context::new(&self.config, tree);
        let classes: Vec<_> = tree.classes().collect();
        let problems: Vec<_> = classes
            .par_iter()
            .flat_map_iter(|&class| self.visit_class(&ctx, class))
            .collect();

        debug!("analyzed {} classes: {} problems", tree.len(), problems.len());
        problems
    }

    /// Analyze several versions in parallel.
    #[must_use]
    pub fn analyze_versions(
        &self,
        trees: &BTreeMap<Version, MappingTree>,
    ) -> BTreeMap<Version, Vec<Problem>> {
        trees
            .par_iter()
            .map(|(version, tree)| {
                let problems = self.analyze(tree);
                debug!("{version}: {} problems", problems.len());
                (version.clone(), problems)
            })
            .collect()
    }

    /// Analyze and apply all resolutions until no resolvable problem is
    /// left or `max_passes` passes have run.
    ///
    /// Nested classes whose owners only get names in an earlier pass are
    /// completed by later passes.
    ///
    /// Cyclic supertypes (`a extends b`, `b extends a`) with differently
    /// named overrides swap names on every pass and never settle; such a
    /// tree runs until `max_passes` and comes back not stable.
    pub fn fix_until_stable(
        &self,
        tree: &mut MappingTree,
        max_passes: usize,
    ) -> MappingResult<FixOutcome> {
        let mut outcome = FixOutcome::default();
        loop {
            let problems = self.analyze(tree);
            if outcome.passes == max_passes || !problems.iter().any(Problem::is_resolvable) {
                outcome.remaining = problems;
                break;
            }
            outcome.applied += apply_all(&problems, tree)?;
            outcome.passes += 1;
        }

        debug!(
            "fixed tree in {} passes: {} applied, {} remaining",
            outcome.passes,
            outcome.applied,
            outcome.remaining.len()
        );
        Ok(outcome)
    }

    // ========================================================================
    // Rules
    // ========================================================================

    fn visit_class<'t>(&self, ctx: &Context<'t>, class: ClassRef<'t>) -> Vec<Problem> {
        let mut problems = Vec::new();

        if let Some(problem) = ctx.removal(class.raw_modifiers(), || ElementPath::class(class)) {
            trace!("{problem}");
            problems.push(problem);
            return problems;
        }

        check_inner_class(ctx, class, &mut problems);

        for field in class.fields() {
            if let Some(problem) = ctx.removal(field.raw_modifiers(), || ElementPath::field(field)) {
                problems.push(problem);
            }
        }

        let visit = ClassVisit::new(ctx, class);
        for method in class.methods() {
            if let Some(problem) =
                ctx.removal(method.raw_modifiers(), || ElementPath::method(method))
            {
                problems.push(problem);
            } else if visit.is_special(method) {
                check_special_method(ctx, method, &mut problems);
            } else {
                check_inheritance(ctx, &visit, method, &mut problems);
            }
        }

        for problem in &problems {
            trace!("{problem}");
        }
        problems
    }
}

fn check_inner_class<'t>(ctx: &Context<'t>, class: ClassRef<'t>, problems: &mut Vec<Problem>) {
    let name = class.src_name();
    if !name.contains(INNER_CLASS_SEPARATOR) {
        return;
    }

    for &(ns, ns_name) in &ctx.namespaces.inner_class {
        if class.dst_name(ns).is_some() {
            continue;
        }

        // Nearest owner first: a$b$c tries a$b, then a
        let owner = name
            .rmatch_indices(INNER_CLASS_SEPARATOR)
            .find_map(|(at, _)| {
                let (owner, rest) = name.split_at(at);
                let remainder = rest.strip_prefix(INNER_CLASS_SEPARATOR)?;
                ctx.tree
                    .map_class_name(owner, ns)
                    .map(|mapped| (owner, mapped, remainder))
            });

        let element = ElementPath::class(class);
        problems.push(match owner {
            Some((owner, mapped, remainder)) => Problem::rename(
                ProblemKind::InnerClassOwnerNotMapped,
                element,
                ns_name,
                &format!("{mapped}{INNER_CLASS_SEPARATOR}{remainder}"),
                format!("unnamed in {ns_name}, owner {owner} is {mapped}"),
            ),
            None => Problem::unresolved(
                ProblemKind::InnerClassOwnerNotMapped,
                element,
                format!("unnamed in {ns_name}, no owner is named"),
            ),
        });
    }
}

fn check_special_method(ctx: &Context<'_>, method: MethodRef<'_>, problems: &mut Vec<Problem>) {
    let src = method.src_name();
    for &(ns, ns_name) in &ctx.namespaces.checked {
        let current = method.dst_name(ns);
        if current == Some(src) {
            continue;
        }
        problems.push(Problem::rename(
            ProblemKind::SpecialMethodNotMapped,
            ElementPath::method(method),
            ns_name,
            src,
            format!("{ns_name} name is {}", current.unwrap_or("unset")),
        ));
    }
}

/// Whether `candidate`, declared by a supertype, is overridden by `method`.
fn overrides<'t>(ctx: &Context<'t>, method: MethodRef<'t>, candidate: MethodRef<'t>) -> bool {
    if candidate.is_constructor()
        || candidate.is_static_initializer()
        || is_private(candidate.access())
        || descriptor::parameters(candidate.src_desc()) != descriptor::parameters(method.src_desc())
    {
        return false;
    }

    candidate.src_name() == method.src_name()
        || ctx.namespaces.cross_check.iter().any(|&ns| {
            method
                .dst_name(ns)
                .is_some_and(|name| candidate.dst_name(ns) == Some(name))
        })
}

fn check_inheritance<'t>(
    ctx: &Context<'t>,
    visit: &ClassVisit<'t>,
    method: MethodRef<'t>,
    problems: &mut Vec<Problem>,
) {
    if visit.detached || is_private(method.access()) {
        return;
    }

    let overridden: Vec<_> = visit
        .supertypes
        .iter()
        .flat_map(|supertype| supertype.methods())
        .filter(|&candidate| overrides(ctx, method, candidate))
        .collect();
    if overridden.is_empty() {
        return;
    }

    for &(ns, ns_name) in &ctx.namespaces.checked {
        // First override named in this namespace settles it
        let Some((parent, expected)) = overridden
            .iter()
            .find_map(|&parent| parent.dst_name(ns).map(|name| (parent, name)))
        else {
            continue;
        };

        let current = method.dst_name(ns);
        if current == Some(expected) {
            continue;
        }
        problems.push(Problem::rename(
            ProblemKind::InheritanceError,
            ElementPath::method(method),
            ns_name,
            expected,
            format!(
                "{ns_name} name is {}, {} is {expected}",
                current.unwrap_or("unset"),
                ElementPath::method(parent)
            ),
        ));
    }
}
