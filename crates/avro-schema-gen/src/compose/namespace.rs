// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Namespace and documentation policy.

use crate::options::NamespaceMode;

/// Namespace for a type declared in `origin`.
///
/// Priority: explicit override, then `Disabled` (none), then the origin path
/// (first segment, or all of it under `FullModule`). Empty results are
/// treated as absent.
pub fn resolve_namespace(
    namespace_override: Option<&str>,
    mode: NamespaceMode,
    origin: Option<&str>,
) -> Option<String> {
    if let Some(ns) = namespace_override.filter(|ns| !ns.is_empty()) {
        return Some(ns.to_string());
    }
    let origin = origin.filter(|o| !o.is_empty())?;
    match mode {
        NamespaceMode::Disabled => None,
        NamespaceMode::TopLevel => origin
            .split('.')
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        NamespaceMode::FullModule => Some(origin.to_string()),
    }
}

/// First paragraph of a doc string, its lines trimmed and joined by single
/// spaces. `None` when nothing is left.
pub fn first_paragraph(doc: &str) -> Option<String> {
    let paragraph: Vec<&str> = doc
        .lines()
        .map(str::trim)
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.is_empty())
        .collect();
    if paragraph.is_empty() {
        None
    } else {
        Some(paragraph.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_always_wins() {
        for mode in [
            NamespaceMode::TopLevel,
            NamespaceMode::FullModule,
            NamespaceMode::Disabled,
        ] {
            assert_eq!(
                resolve_namespace(Some("com.acme"), mode, Some("shop.model")).as_deref(),
                Some("com.acme")
            );
        }
    }

    #[test]
    fn test_modes() {
        let origin = Some("shop.orders.model");
        assert_eq!(
            resolve_namespace(None, NamespaceMode::TopLevel, origin).as_deref(),
            Some("shop")
        );
        assert_eq!(
            resolve_namespace(None, NamespaceMode::FullModule, origin).as_deref(),
            Some("shop.orders.model")
        );
        assert_eq!(resolve_namespace(None, NamespaceMode::Disabled, origin), None);
    }

    #[test]
    fn test_missing_origin_and_empty_override() {
        assert_eq!(resolve_namespace(None, NamespaceMode::TopLevel, None), None);
        assert_eq!(
            resolve_namespace(Some(""), NamespaceMode::TopLevel, Some("shop")).as_deref(),
            Some("shop")
        );
    }

    #[test]
    fn test_first_paragraph() {
        let doc = "\n    An order line.\n    Spans two lines.\n\n    Details that are dropped.\n";
        assert_eq!(
            first_paragraph(doc).as_deref(),
            Some("An order line. Spans two lines.")
        );
        assert_eq!(first_paragraph("  \n\n "), None);
    }
}
