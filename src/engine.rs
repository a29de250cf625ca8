//! Style engine: the global stylesheet, element-scoped sheets and the
//! render-rule cache.

use std::rc::Rc;

use slotmap::SlotMap;

use crate::css::cache::{RenderRuleCache, RenderRuleCacheKey};
use crate::css::matcher::{match_rules, MatchedStyleRule, StyledElement};
use crate::css::model::SheetId;
use crate::css::parser::ParseError;
use crate::css::pseudo::PseudoState;
use crate::css::render_rule::RenderRule;
use crate::css::stylesheet::StyleSheet;

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`StyleEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Optional stylesheet to load on construction.
    pub css: Option<String>,
    /// Emit each parse diagnostic through `log::warn!`.
    pub log_diagnostics: bool,
    /// Upper bound on diagnostics kept after a load.
    pub max_diagnostics: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            css: None,
            log_diagnostics: true,
            max_diagnostics: 100,
        }
    }
}

impl EngineConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial stylesheet (builder).
    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }

    /// Enable or disable diagnostic logging (builder).
    pub fn with_log_diagnostics(mut self, enabled: bool) -> Self {
        self.log_diagnostics = enabled;
        self
    }

    /// Set the diagnostic bound (builder).
    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = max;
        self
    }
}

// ---------------------------------------------------------------------------
// StyleEngine
// ---------------------------------------------------------------------------

/// Parses stylesheets, matches them against elements and hands out shared,
/// resolved [`RenderRule`]s.
///
/// Besides the global sheet the engine holds element-scoped sheets. An
/// element names one through [`StyledElement::style_sheet`]; its rules apply
/// to that element and its descendants. The cascade is the global sheet's
/// matches, then each scoped sheet's, outermost ancestor first, so a scoped
/// rule beats any global rule whatever their specificity.
///
/// Single-threaded: tables are shared through `Rc`.
#[derive(Debug)]
pub struct StyleEngine {
    sheet: StyleSheet,
    scoped: SlotMap<SheetId, StyleSheet>,
    cache: RenderRuleCache,
    diagnostics: Vec<ParseError>,
    config: EngineConfig,
}

impl StyleEngine {
    /// Create an engine, loading `config.css` if set.
    pub fn new(config: EngineConfig) -> Self {
        let mut engine = Self {
            sheet: StyleSheet::new(),
            scoped: SlotMap::with_key(),
            cache: RenderRuleCache::new(),
            diagnostics: Vec::new(),
            config,
        };
        if let Some(css) = engine.config.css.take() {
            engine.load(&css);
            engine.config.css = Some(css);
        }
        engine
    }

    /// Create an engine with default config and the given stylesheet.
    pub fn from_css(css: &str) -> Self {
        Self::new(EngineConfig::new().with_css(css))
    }

    /// Replace the global stylesheet and drop every cached table.
    ///
    /// Returns the diagnostics of this load, up to the configured bound.
    pub fn load(&mut self, css: &str) -> &[ParseError] {
        let (sheet, diagnostics) = self.parse(css);

        log::debug!(
            target: "gilt_style::engine",
            "loaded {} rules, dropping {} cached tables",
            sheet.len(),
            self.cache.len()
        );
        self.sheet = sheet;
        self.cache.clear();
        self.diagnostics = diagnostics;
        &self.diagnostics
    }

    /// Parse `css`, logging and bounding the diagnostics as configured.
    fn parse(&self, css: &str) -> (StyleSheet, Vec<ParseError>) {
        let (sheet, mut diagnostics) = StyleSheet::parse(css);

        if self.config.log_diagnostics {
            for diagnostic in &diagnostics {
                log::warn!(target: "gilt_style::parser", "{diagnostic}");
            }
        }
        if diagnostics.len() > self.config.max_diagnostics {
            log::debug!(
                target: "gilt_style::engine",
                "keeping {} of {} diagnostics",
                self.config.max_diagnostics,
                diagnostics.len()
            );
            diagnostics.truncate(self.config.max_diagnostics);
        }
        (sheet, diagnostics)
    }

    /// The global stylesheet.
    pub fn stylesheet(&self) -> &StyleSheet {
        &self.sheet
    }

    // ── Element-scoped sheets ────────────────────────────────────────

    /// Parse an element-scoped sheet. Elements opt in by returning the
    /// handle from [`StyledElement::style_sheet`].
    pub fn add_style_sheet(&mut self, css: &str) -> (SheetId, Vec<ParseError>) {
        let (sheet, diagnostics) = self.parse(css);
        log::debug!(
            target: "gilt_style::engine",
            "added scoped sheet with {} rules",
            sheet.len()
        );
        (self.scoped.insert(sheet), diagnostics)
    }

    /// Replace the contents of a scoped sheet, keeping its handle, and drop
    /// every cached table. Returns `None` if `id` is unknown.
    pub fn replace_style_sheet(&mut self, id: SheetId, css: &str) -> Option<Vec<ParseError>> {
        if !self.scoped.contains_key(id) {
            return None;
        }
        let (sheet, diagnostics) = self.parse(css);
        self.scoped[id] = sheet;
        self.cache.clear();
        Some(diagnostics)
    }

    /// Drop a scoped sheet and every cached table. Elements still naming
    /// it are styled as if they named none.
    pub fn remove_style_sheet(&mut self, id: SheetId) -> Option<StyleSheet> {
        let removed = self.scoped.remove(id)?;
        self.cache.clear();
        Some(removed)
    }

    pub fn scoped_style_sheet(&self, id: SheetId) -> Option<&StyleSheet> {
        self.scoped.get(id)
    }

    /// Diagnostics of the last load.
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Resolution ───────────────────────────────────────────────────

    /// Rules matching `element`, in cascade order.
    pub fn matched_rules<E: StyledElement>(&self, element: &E) -> Vec<MatchedStyleRule<'_>> {
        collect_matches(&self.sheet, &self.scoped, element)
    }

    /// Identity of the rule combination matching `element`.
    pub fn cache_key<E: StyledElement>(&self, element: &E) -> RenderRuleCacheKey {
        RenderRuleCacheKey::from_matches(&self.matched_rules(element))
    }

    /// The resolved style of `element`.
    ///
    /// Elements matching the same rules in the same order get the same `Rc`.
    /// An element that does not use stylesheets gets the empty table.
    pub fn resolve<E: StyledElement>(&mut self, element: &E) -> Rc<RenderRule> {
        let matched = collect_matches(&self.sheet, &self.scoped, element);
        self.cache.get_or_resolve(&matched)
    }

    /// Whether moving `element` from `old_state` to `new_state` changes the
    /// rules that match it.
    ///
    /// Answers `false` without matching when no selector of a sheet in
    /// scope names any of the changed flags.
    pub fn restyle_needed<E>(
        &self,
        element: &E,
        old_state: PseudoState,
        new_state: PseudoState,
    ) -> bool
    where
        E: StyledElement + Clone,
    {
        if !element.uses_style_sheets() {
            return false;
        }
        let mask = sheet_scope(element)
            .into_iter()
            .filter_map(|id| self.scoped.get(id))
            .fold(self.sheet.pseudo_mask(), |mask, sheet| mask | sheet.pseudo_mask());
        let changed = old_state.symmetric_difference(new_state);
        if !changed.intersects(mask) {
            return false;
        }
        let before = self.cache_key(&WithState::new(element.clone(), old_state));
        let after = self.cache_key(&WithState::new(element.clone(), new_state));
        before != after
    }

    /// Number of distinct resolved tables held.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Matches of the global sheet, then of each scoped sheet in scope, each
/// group in its own cascade order.
fn collect_matches<'s, E: StyledElement>(
    global: &'s StyleSheet,
    scoped: &'s SlotMap<SheetId, StyleSheet>,
    element: &E,
) -> Vec<MatchedStyleRule<'s>> {
    if !element.uses_style_sheets() {
        return Vec::new();
    }

    let mut matched = match_rules(global, element);
    for id in sheet_scope(element) {
        let Some(sheet) = scoped.get(id) else {
            continue;
        };
        matched.extend(
            match_rules(sheet, element)
                .into_iter()
                .map(|m| MatchedStyleRule {
                    sheet: Some(id),
                    ..m
                }),
        );
    }
    matched
}

/// Scoped sheets named by `element` or its ancestors, outermost first. A
/// sheet named at several levels counts at the innermost one.
fn sheet_scope<E: StyledElement>(element: &E) -> Vec<SheetId> {
    let mut scope: Vec<SheetId> = element.style_sheet().into_iter().collect();
    let mut current = element.parent();
    while let Some(ancestor) = current {
        if let Some(id) = ancestor.style_sheet() {
            if !scope.contains(&id) {
                scope.push(id);
            }
        }
        current = ancestor.parent();
    }
    scope.reverse();
    scope
}

/// An element seen with a substitute pseudo state; ancestors keep their own.
struct WithState<E> {
    element: E,
    state: Option<PseudoState>,
}

impl<E> WithState<E> {
    fn new(element: E, state: PseudoState) -> Self {
        Self {
            element,
            state: Some(state),
        }
    }
}

impl<E: StyledElement> StyledElement for WithState<E> {
    fn type_name(&self) -> &str {
        self.element.type_name()
    }

    fn identifier(&self) -> &str {
        self.element.identifier()
    }

    fn pseudo_state(&self) -> PseudoState {
        self.state.unwrap_or_else(|| self.element.pseudo_state())
    }

    fn parent(&self) -> Option<Self> {
        self.element.parent().map(|element| WithState {
            element,
            state: None,
        })
    }

    fn style_sheet(&self) -> Option<SheetId> {
        self.element.style_sheet()
    }

    fn uses_style_sheets(&self) -> bool {
        self.element.uses_style_sheets()
    }
}
