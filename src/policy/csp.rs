//! Content-Security-Policy directives and their source lists.

use serde::{Deserialize, Serialize};

use crate::policy::slots::{Slot, SlotMap};
use crate::policy::sources;

/// One directive of the Content-Security-Policy header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CspDirective {
    DefaultSrc,
    ChildSrc,
    ConnectSrc,
    FontSrc,
    FrameSrc,
    ImgSrc,
    ManifestSrc,
    MediaSrc,
    ObjectSrc,
    PrefetchSrc,
    ScriptSrc,
    ScriptSrcElem,
    ScriptSrcAttr,
    StyleSrc,
    StyleSrcElem,
    StyleSrcAttr,
    WorkerSrc,
    BaseUri,
    Sandbox,
    FormAction,
    FrameAncestors,
    NavigateTo,
    /// Superseded by `report-to`, still understood by most browsers.
    ReportUri,
    ReportTo,
    RequireTrustedTypesFor,
    TrustedTypes,
    UpgradeInsecureRequests,
}

/// Source list of one directive.
///
/// Sources are raw tokens (keywords, hosts, schemes, nonces, hashes) written
/// out verbatim in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FetchDirectiveEntry {
    pub enabled: bool,
    pub sources: Vec<String>,
}

impl FetchDirectiveEntry {
    /// An enabled directive with the given sources.
    pub fn with_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: true,
            sources: sources.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchDirectivePatch {
    enabled: Option<bool>,
    sources: Option<Vec<String>>,
}

impl Slot for CspDirective {
    type Entry = FetchDirectiveEntry;
    type Patch = FetchDirectivePatch;

    const ORDER: &'static [Self] = &[
        CspDirective::DefaultSrc,
        CspDirective::ChildSrc,
        CspDirective::ConnectSrc,
        CspDirective::FontSrc,
        CspDirective::FrameSrc,
        CspDirective::ImgSrc,
        CspDirective::ManifestSrc,
        CspDirective::MediaSrc,
        CspDirective::ObjectSrc,
        CspDirective::PrefetchSrc,
        CspDirective::ScriptSrc,
        CspDirective::ScriptSrcElem,
        CspDirective::ScriptSrcAttr,
        CspDirective::StyleSrc,
        CspDirective::StyleSrcElem,
        CspDirective::StyleSrcAttr,
        CspDirective::WorkerSrc,
        CspDirective::BaseUri,
        CspDirective::Sandbox,
        CspDirective::FormAction,
        CspDirective::FrameAncestors,
        CspDirective::NavigateTo,
        CspDirective::ReportUri,
        CspDirective::ReportTo,
        CspDirective::RequireTrustedTypesFor,
        CspDirective::TrustedTypes,
        CspDirective::UpgradeInsecureRequests,
    ];

    fn token(self) -> &'static str {
        match self {
            CspDirective::DefaultSrc => "default-src",
            CspDirective::ChildSrc => "child-src",
            CspDirective::ConnectSrc => "connect-src",
            CspDirective::FontSrc => "font-src",
            CspDirective::FrameSrc => "frame-src",
            CspDirective::ImgSrc => "img-src",
            CspDirective::ManifestSrc => "manifest-src",
            CspDirective::MediaSrc => "media-src",
            CspDirective::ObjectSrc => "object-src",
            CspDirective::PrefetchSrc => "prefetch-src",
            CspDirective::ScriptSrc => "script-src",
            CspDirective::ScriptSrcElem => "script-src-elem",
            CspDirective::ScriptSrcAttr => "script-src-attr",
            CspDirective::StyleSrc => "style-src",
            CspDirective::StyleSrcElem => "style-src-elem",
            CspDirective::StyleSrcAttr => "style-src-attr",
            CspDirective::WorkerSrc => "worker-src",
            CspDirective::BaseUri => "base-uri",
            CspDirective::Sandbox => "sandbox",
            CspDirective::FormAction => "form-action",
            CspDirective::FrameAncestors => "frame-ancestors",
            CspDirective::NavigateTo => "navigate-to",
            CspDirective::ReportUri => "report-uri",
            CspDirective::ReportTo => "report-to",
            CspDirective::RequireTrustedTypesFor => "require-trusted-types-for",
            CspDirective::TrustedTypes => "trusted-types",
            CspDirective::UpgradeInsecureRequests => "upgrade-insecure-requests",
        }
    }

    fn default_entry(self) -> FetchDirectiveEntry {
        match self {
            CspDirective::DefaultSrc => FetchDirectiveEntry::with_sources([sources::NONE]),
            _ => FetchDirectiveEntry::default(),
        }
    }

    fn apply(entry: &mut FetchDirectiveEntry, patch: FetchDirectivePatch) {
        if let Some(enabled) = patch.enabled {
            entry.enabled = enabled;
        }
        if let Some(sources) = patch.sources {
            entry.sources = sources;
        }
    }
}

/// `Content-Security-Policy` configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentSecurityPolicyConfig {
    pub enabled: bool,
    pub directives: SlotMap<CspDirective>,
}

impl ContentSecurityPolicyConfig {
    pub fn directive(&self, directive: CspDirective) -> Option<&FetchDirectiveEntry> {
        self.directives.get(directive)
    }

    pub fn directive_mut(&mut self, directive: CspDirective) -> &mut FetchDirectiveEntry {
        self.directives.get_mut(directive)
    }
}

impl Default for ContentSecurityPolicyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directives: SlotMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        let order = CspDirective::ORDER;
        assert_eq!(order.len(), 27);
        assert_eq!(order[0], CspDirective::DefaultSrc);
        assert_eq!(order[10].token(), "script-src");
        assert_eq!(order[20].token(), "frame-ancestors");
        assert_eq!(order[26].token(), "upgrade-insecure-requests");
        for (i, a) in order.iter().enumerate() {
            for b in &order[i + 1..] {
                assert_ne!(a.token(), b.token());
            }
        }
    }

    #[test]
    fn test_only_default_src_enabled_by_default() {
        let config = ContentSecurityPolicyConfig::default();
        for (directive, entry) in config.directives.iter() {
            if directive == CspDirective::DefaultSrc {
                assert!(entry.enabled);
                assert_eq!(entry.sources, vec!["'none'".to_string()]);
            } else {
                assert!(!entry.enabled, "{:?}", directive);
                assert!(entry.sources.is_empty(), "{:?}", directive);
            }
        }
    }

    #[test]
    fn test_partial_toml() {
        let config: ContentSecurityPolicyConfig = toml::from_str(
            r#"
            [directives.script-src]
            enabled = true
            sources = ["'self'", "https://cdn.example.com"]
            "#,
        )
        .unwrap();

        let default_src = config.directive(CspDirective::DefaultSrc).unwrap();
        assert!(default_src.enabled);
        assert_eq!(default_src.sources, vec!["'none'".to_string()]);

        let script_src = config.directive(CspDirective::ScriptSrc).unwrap();
        assert!(script_src.enabled);
        assert_eq!(script_src.sources.len(), 2);
    }
}
