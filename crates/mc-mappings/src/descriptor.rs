//! JVM type descriptors.
//!
//! Descriptors reference classes by source name (`Lnet/minecraft/class_1297;`).
//! Mapping a descriptor into a namespace replaces each referenced class with
//! its name in that namespace; classes without one keep their source name.

/// Replace every class reference in `desc` using `lookup`.
///
/// ```
/// use mc_mappings::descriptor;
///
/// let mapped = descriptor::map("(La;I[Lb;)Lc;", |class| match class {
///     "a" => Some("Entity"),
///     "c" => Some("World"),
///     _ => None,
/// });
/// assert_eq!(mapped, "(LEntity;I[Lb;)LWorld;");
/// ```
pub fn map<'a>(desc: &str, mut lookup: impl FnMut(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(desc.len());
    let mut rest = desc;

    while let Some((head, after)) = rest.split_once('L') {
        out.push_str(head);
        out.push('L');
        let Some((class, tail)) = after.split_once(';') else {
            // Truncated reference, keep as-is
            out.push_str(after);
            return out;
        };

        out.push_str(lookup(class).unwrap_or(class));
        out.push(';');
        rest = tail;
    }

    out.push_str(rest);
    out
}

/// The parameter part of a method descriptor, parentheses included.
///
/// Field descriptors have no parameter list and are returned unchanged.
#[must_use]
pub fn parameters(desc: &str) -> &str {
    if !desc.starts_with('(') {
        return desc;
    }
    desc.find(')')
        .and_then(|end| desc.get(..=end))
        .unwrap_or(desc)
}
