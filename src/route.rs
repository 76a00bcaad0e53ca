//! Nested page dispatch.
//!
//! Two dispatch levels: a top-level split on feature family, then a
//! per-family table for the sub-action. Each level is an ordered list of
//! (pattern, route) pairs tried in registration order. A literal segment
//! always outranks a parameterized segment at the same depth, and
//! registration order breaks the remaining ties; an unmatched path renders
//! nothing rather than erroring.

use crate::family::FeatureFamily;

/// One segment of a registered pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternSegment {
    /// Must equal the request segment exactly.
    Literal(&'static str),
    /// Matches any single segment and captures it.
    Param,
    /// Matches the remainder of the path, including an empty remainder.
    /// Only allowed in last position.
    Rest,
}

// Per-segment specificity ranks. Compared lexicographically across the
// consumed path, so the first differing segment decides.
const RANK_LITERAL: u8 = 2;
const RANK_PARAM: u8 = 1;
const RANK_REST: u8 = 0;

#[derive(Debug)]
struct Pattern {
    segments: Vec<PatternSegment>,
}

impl Pattern {
    fn parse(pattern: &'static str) -> Self {
        let mut segments = Vec::new();
        for raw in pattern.split('/').filter(|s| !s.is_empty()) {
            debug_assert!(
                !segments.contains(&PatternSegment::Rest),
                "'*' must be the last segment in {pattern}"
            );
            let segment = if raw == "*" {
                PatternSegment::Rest
            } else if raw.starts_with(':') {
                PatternSegment::Param
            } else {
                PatternSegment::Literal(raw)
            };
            segments.push(segment);
        }
        Pattern { segments }
    }

    /// Try to match the split path. On success returns the specificity
    /// score (one rank per consumed path segment), the captured parameters
    /// in pattern order, and the remainder consumed by a trailing `*`.
    fn match_segments(&self, path: &[&str]) -> Option<(Vec<u8>, Vec<String>, String)> {
        let mut score = Vec::with_capacity(path.len());
        let mut params = Vec::new();
        let mut i = 0;

        for segment in &self.segments {
            match segment {
                PatternSegment::Literal(lit) => {
                    if path.get(i).copied() != Some(*lit) {
                        return None;
                    }
                    score.push(RANK_LITERAL);
                    i += 1;
                }
                PatternSegment::Param => {
                    let value = path.get(i)?;
                    params.push((*value).to_string());
                    score.push(RANK_PARAM);
                    i += 1;
                }
                PatternSegment::Rest => {
                    let rest = path[i..].join("/");
                    score.extend(std::iter::repeat(RANK_REST).take(path.len() - i));
                    return Some((score, params, rest));
                }
            }
        }

        if i == path.len() {
            Some((score, params, String::new()))
        } else {
            None
        }
    }
}

/// A successful dispatch at one level.
#[derive(Debug)]
pub struct MatchedRoute<T> {
    pub route: T,
    /// Captured `:param` values in pattern order.
    pub params: Vec<String>,
    /// Remainder of the path consumed by a trailing `*`, "" otherwise.
    pub rest: String,
}

/// Ordered (pattern, route) dispatch table for one level.
pub struct RouteTable<T: Copy> {
    entries: Vec<(Pattern, T)>,
}

impl<T: Copy> RouteTable<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register a pattern. Order matters: among equally specific matches,
    /// the earliest registration wins.
    pub fn register(&mut self, pattern: &'static str, route: T) {
        self.entries.push((Pattern::parse(pattern), route));
    }

    /// Dispatch a path against the table. Returns the most specific match,
    /// or `None` when nothing matches.
    pub fn dispatch(&self, path: &str) -> Option<MatchedRoute<T>> {
        let segments = split_path(path);
        let mut best: Option<(Vec<u8>, MatchedRoute<T>)> = None;

        for (pattern, route) in &self.entries {
            let Some((score, params, rest)) = pattern.match_segments(&segments) else {
                continue;
            };
            let better = match &best {
                // Strictly-greater keeps the earlier registration on ties.
                Some((best_score, _)) => score > *best_score,
                None => true,
            };
            if better {
                best = Some((
                    score,
                    MatchedRoute {
                        route: *route,
                        params,
                        rest,
                    },
                ));
            }
        }

        best.map(|(_, matched)| matched)
    }
}

impl<T: Copy> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let path = path.split('?').next().unwrap_or("");
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// One of the mounted page destinations, or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Landing,
    Create(FeatureFamily),
    Admin { family: FeatureFamily, id: String },
    AdminList(FeatureFamily),
    View { family: FeatureFamily, id: String },
    /// Unmatched path: render nothing.
    NotFound,
}

#[derive(Debug, Clone, Copy)]
enum TopRoute {
    Landing,
    Family(FeatureFamily),
}

#[derive(Debug, Clone, Copy)]
enum FamilyRoute {
    Create,
    Admin,
    AdminList,
    View,
}

/// The application's full two-level route table.
pub struct AppRouter {
    top: RouteTable<TopRoute>,
    allowlist: RouteTable<FamilyRoute>,
    subscription: RouteTable<FamilyRoute>,
}

impl AppRouter {
    pub fn new() -> Self {
        let mut top = RouteTable::new();
        top.register("/", TopRoute::Landing);
        top.register(
            "/allowlist-example/*",
            TopRoute::Family(FeatureFamily::Allowlist),
        );
        top.register(
            "/subscription-example/*",
            TopRoute::Family(FeatureFamily::Subscription),
        );

        Self {
            top,
            allowlist: Self::family_table(FeatureFamily::Allowlist),
            subscription: Self::family_table(FeatureFamily::Subscription),
        }
    }

    fn family_table(family: FeatureFamily) -> RouteTable<FamilyRoute> {
        let mut table = RouteTable::new();
        table.register("/", FamilyRoute::Create);
        match family {
            FeatureFamily::Allowlist => {
                table.register("/admin/allowlist/:id", FamilyRoute::Admin);
                table.register("/admin/allowlists", FamilyRoute::AdminList);
                table.register("/view/allowlist/:id", FamilyRoute::View);
            }
            FeatureFamily::Subscription => {
                table.register("/admin/service/:id", FamilyRoute::Admin);
                table.register("/admin/services", FamilyRoute::AdminList);
                table.register("/view/service/:id", FamilyRoute::View);
            }
        }
        table
    }

    /// Resolve an in-app path to a route outcome.
    pub fn dispatch(&self, path: &str) -> RouteOutcome {
        let Some(top) = self.top.dispatch(path) else {
            return RouteOutcome::NotFound;
        };

        let family = match top.route {
            TopRoute::Landing => return RouteOutcome::Landing,
            TopRoute::Family(family) => family,
        };
        let table = match family {
            FeatureFamily::Allowlist => &self.allowlist,
            FeatureFamily::Subscription => &self.subscription,
        };
        let Some(matched) = table.dispatch(&top.rest) else {
            return RouteOutcome::NotFound;
        };

        match matched.route {
            FamilyRoute::Create => RouteOutcome::Create(family),
            FamilyRoute::AdminList => RouteOutcome::AdminList(family),
            FamilyRoute::Admin => match matched.params.into_iter().next() {
                Some(id) => RouteOutcome::Admin { family, id },
                None => RouteOutcome::NotFound,
            },
            FamilyRoute::View => match matched.params.into_iter().next() {
                Some(id) => RouteOutcome::View { family, id },
                None => RouteOutcome::NotFound,
            },
        }
    }
}

impl Default for AppRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Probe {
        A,
        B,
        C,
    }

    #[test]
    fn test_literal_outranks_param_at_same_depth() {
        let mut table = RouteTable::new();
        // Parameterized pattern registered first on purpose.
        table.register("/admin/:id", Probe::A);
        table.register("/admin/allowlists", Probe::B);

        let matched = table.dispatch("/admin/allowlists").unwrap();
        assert_eq!(matched.route, Probe::B);

        let matched = table.dispatch("/admin/0x123").unwrap();
        assert_eq!(matched.route, Probe::A);
        assert_eq!(matched.params, vec!["0x123".to_string()]);
    }

    #[test]
    fn test_registration_order_breaks_param_ties() {
        let mut table = RouteTable::new();
        table.register("/view/:id", Probe::A);
        table.register("/view/:name", Probe::B);

        let matched = table.dispatch("/view/anything").unwrap();
        assert_eq!(matched.route, Probe::A);
    }

    #[test]
    fn test_param_outranks_trailing_rest() {
        let mut table = RouteTable::new();
        table.register("/files/*", Probe::A);
        table.register("/files/:name", Probe::B);

        let matched = table.dispatch("/files/report").unwrap();
        assert_eq!(matched.route, Probe::B);

        // Deeper paths only fit the rest pattern.
        let matched = table.dispatch("/files/2024/report").unwrap();
        assert_eq!(matched.route, Probe::A);
        assert_eq!(matched.rest, "2024/report");
    }

    #[test]
    fn test_rest_matches_empty_remainder() {
        let mut table = RouteTable::new();
        table.register("/files/*", Probe::C);

        let matched = table.dispatch("/files").unwrap();
        assert_eq!(matched.route, Probe::C);
        assert_eq!(matched.rest, "");
    }

    #[test]
    fn test_unmatched_path_dispatches_to_nothing() {
        let mut table = RouteTable::new();
        table.register("/admin/allowlists", Probe::A);
        assert!(table.dispatch("/admin").is_none());
        assert!(table.dispatch("/admin/allowlists/extra").is_none());
    }

    #[test]
    fn test_trailing_slash_and_query_are_ignored() {
        let router = AppRouter::new();
        assert_eq!(
            router.dispatch("/allowlist-example/admin/allowlists/"),
            RouteOutcome::AdminList(FeatureFamily::Allowlist)
        );
        assert_eq!(
            router.dispatch("/subscription-example/?ref=home"),
            RouteOutcome::Create(FeatureFamily::Subscription)
        );
    }
}
