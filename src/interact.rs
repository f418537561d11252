//! Client-side interaction state.
//!
//! Each machine is owned by the smallest UI scope that needs it and talks to
//! the page through a trait ([`ScrollLock`]) instead of reaching for globals.
//! The renderer runs them at build time for the initial markup and for the
//! transition tables that `embed/site.js` follows in the browser:
//!
//! | Machine          | Markup                                   |
//! |------------------|------------------------------------------|
//! | `SectionTracker` | `aria-current`, `data-fragments`         |
//! | `Lightbox`       | `data-lightbox-transitions`              |
//! | `CategoryFilter` | `aria-pressed`, `data-filter-table`      |
//! | `ExperienceTabs` | `aria-selected`, `hidden` panels         |
//! | `Theme`          | `data-theme-choice` buttons              |

use serde::Serialize;
use std::{collections::BTreeMap, fmt};

// ============================================================================
// Active Section
// ============================================================================

/// Which home-page section the navbar highlights.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    sections: Vec<String>,
    active: usize,
}

impl SectionTracker {
    /// Visible fraction a section needs before it becomes active.
    pub const THRESHOLD: f32 = 0.2;

    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            active: 0,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.sections.get(self.active).map(String::as_str)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active() == Some(id)
    }

    /// Location fragment changed; an empty fragment means the first section.
    /// Unknown ids leave the active section alone.
    pub fn hash_changed(&mut self, fragment: &str) {
        let id = fragment.trim_start_matches('#');
        if id.is_empty() {
            self.active = 0;
        } else if let Some(index) = self.sections.iter().position(|s| s == id) {
            self.active = index;
        }
    }

    /// Section selected by each known fragment, `""` included.
    pub fn fragment_table(&self) -> BTreeMap<String, String> {
        std::iter::once("")
            .chain(self.sections.iter().map(String::as_str))
            .filter_map(|fragment| {
                let mut tracker = self.clone();
                tracker.hash_changed(fragment);
                tracker
                    .active()
                    .map(|active| (fragment.to_owned(), active.to_owned()))
            })
            .collect()
    }
}

// ============================================================================
// Lightbox
// ============================================================================

/// Overflow value applied to the page while the lightbox is open.
pub const LOCKED_OVERFLOW: &str = "hidden";

/// Page scroll control the lightbox suspends while open.
pub trait ScrollLock {
    /// Current overflow setting of the page body ("" when unset).
    fn overflow(&self) -> String;
    fn set_overflow(&mut self, value: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open(String),
}

impl LightboxState {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open(_) => "open",
        }
    }

    pub fn photo(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::Open(photo) => Some(photo.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightboxEvent {
    Select(String),
    Escape,
    ClickBackdrop,
    ClickImage,
    Dismiss,
}

impl LightboxEvent {
    /// Event name used by the client script.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
            Self::Escape => "escape",
            Self::ClickBackdrop => "backdrop",
            Self::ClickImage => "image",
            Self::Dismiss => "dismiss",
        }
    }

    fn each(photo: &str) -> [Self; 5] {
        [
            Self::Select(photo.to_owned()),
            Self::Escape,
            Self::ClickBackdrop,
            Self::ClickImage,
            Self::Dismiss,
        ]
    }
}

/// Enlarged-photo overlay.
pub struct Lightbox<L: ScrollLock> {
    lock: L,
    state: LightboxState,
    saved_overflow: Option<String>,
}

impl<L: ScrollLock> Lightbox<L> {
    pub const fn new(lock: L) -> Self {
        Self {
            lock,
            state: LightboxState::Closed,
            saved_overflow: None,
        }
    }

    pub const fn state(&self) -> &LightboxState {
        &self.state
    }

    pub const fn lock(&self) -> &L {
        &self.lock
    }

    pub fn handle(&mut self, event: LightboxEvent) {
        match event {
            LightboxEvent::Select(photo) => self.open(photo),
            LightboxEvent::Escape | LightboxEvent::ClickBackdrop | LightboxEvent::Dismiss => {
                self.close()
            }
            // Clicks on the image itself stay inside the dialog
            LightboxEvent::ClickImage => {}
        }
    }

    fn open(&mut self, photo: String) {
        if self.saved_overflow.is_none() {
            self.saved_overflow = Some(self.lock.overflow());
            self.lock.set_overflow(LOCKED_OVERFLOW);
        }
        self.state = LightboxState::Open(photo);
    }

    fn close(&mut self) {
        if let Some(saved) = self.saved_overflow.take() {
            self.lock.set_overflow(&saved);
        }
        self.state = LightboxState::Closed;
    }
}

/// What a transition does to the page overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAction {
    Keep,
    /// Save the current value, then apply [`LOCKED_OVERFLOW`].
    Lock,
    /// Put the saved value back.
    Restore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub next: &'static str,
    pub scroll: ScrollAction,
    /// The event's photo replaces the displayed one.
    pub show: bool,
}

/// `state -> event -> transition`.
pub type TransitionTable = BTreeMap<&'static str, BTreeMap<&'static str, Transition>>;

/// Body stand-in that keeps every overflow write.
struct Recorder {
    overflow: String,
    writes: Vec<String>,
}

impl Recorder {
    const INITIAL: &'static str = "auto";
    const SHOWN: &'static str = "shown";
    const SELECTED: &'static str = "selected";
}

impl ScrollLock for Recorder {
    fn overflow(&self) -> String {
        self.overflow.clone()
    }
    fn set_overflow(&mut self, value: &str) {
        self.overflow = value.to_owned();
        self.writes.push(value.to_owned());
    }
}

/// Every state/event pair, found by running the machine against a recorder.
pub fn lightbox_transitions() -> TransitionTable {
    let mut table = TransitionTable::new();
    for start_open in [false, true] {
        for event in LightboxEvent::each(Recorder::SELECTED) {
            let mut lightbox = Lightbox::new(Recorder {
                overflow: Recorder::INITIAL.to_owned(),
                writes: Vec::new(),
            });
            if start_open {
                lightbox.handle(LightboxEvent::Select(Recorder::SHOWN.to_owned()));
            }
            let from = lightbox.state().name();
            let name = event.name();
            let before = lightbox.lock().writes.len();

            lightbox.handle(event);

            let scroll = match lightbox.lock().writes[before..].last().map(String::as_str) {
                None => ScrollAction::Keep,
                Some(LOCKED_OVERFLOW) => ScrollAction::Lock,
                Some(_) => ScrollAction::Restore,
            };
            let next = lightbox.state().name();
            let show = lightbox.state().photo() == Some(Recorder::SELECTED);
            table
                .entry(from)
                .or_default()
                .insert(name, Transition { next, scroll, show });
        }
    }
    table
}

// ============================================================================
// Category Filter
// ============================================================================

/// Label of the unfiltered option.
pub const ALL_CATEGORIES: &str = "All";

pub trait Categorized {
    fn category(&self) -> &str;
}

impl Categorized for crate::content::Project {
    fn category(&self) -> &str {
        &self.record.category
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    All,
    Category(String),
}

/// Single-select category filter over the project grid.
#[derive(Debug, Clone)]
pub struct CategoryFilter {
    categories: Vec<String>,
    selection: Selection,
}

impl CategoryFilter {
    /// Distinct categories, first-seen order kept.
    pub fn new<'a, I: IntoIterator<Item = &'a str>>(categories: I) -> Self {
        let mut distinct: Vec<String> = Vec::new();
        for category in categories {
            if !distinct.iter().any(|c| c == category) {
                distinct.push(category.to_owned());
            }
        }
        Self {
            categories: distinct,
            selection: Selection::All,
        }
    }

    /// Button labels: "All" first.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ALL_CATEGORIES).chain(self.categories.iter().map(String::as_str))
    }

    pub fn is_selected(&self, label: &str) -> bool {
        match &self.selection {
            Selection::All => label == ALL_CATEGORIES,
            Selection::Category(c) => c == label,
        }
    }

    /// Unknown labels leave the selection unchanged.
    pub fn select(&mut self, label: &str) -> bool {
        if label == ALL_CATEGORIES {
            self.selection = Selection::All;
        } else if self.categories.iter().any(|c| c == label) {
            self.selection = Selection::Category(label.to_owned());
        } else {
            return false;
        }
        true
    }

    /// Visible items in their original relative order.
    pub fn apply<'a, T: Categorized>(&self, items: &'a [T]) -> Vec<&'a T> {
        match &self.selection {
            Selection::All => items.iter().collect(),
            Selection::Category(c) => items.iter().filter(|i| i.category() == c).collect(),
        }
    }

    /// Positions in `items` left visible by each option.
    pub fn visibility<T: Categorized>(&self, items: &[T]) -> BTreeMap<String, Vec<usize>> {
        self.options()
            .map(|option| {
                let mut filter = self.clone();
                filter.select(option);
                let visible = filter
                    .apply(items)
                    .into_iter()
                    .filter_map(|shown| items.iter().position(|item| std::ptr::eq(item, shown)))
                    .collect();
                (option.to_owned(), visible)
            })
            .collect()
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Storage key shared with the inline head script and `site.js`.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Theme choice. Persistence lives in the browser's `localStorage`; with
/// nothing usable stored the page stays on `System`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::System, Theme::Light, Theme::Dark];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::System => "Use system theme",
            Self::Light => "Use light theme",
            Self::Dark => "Use dark theme",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Experience Tabs
// ============================================================================

/// Selected role in the experience section. The first role starts active.
#[derive(Debug, Clone, Copy)]
pub struct ExperienceTabs {
    len: usize,
}

impl ExperienceTabs {
    pub const fn new(len: usize) -> Self {
        Self { len }
    }

    pub const fn active(&self) -> Option<usize> {
        if self.len > 0 { Some(0) } else { None }
    }
}
