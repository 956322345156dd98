//! Bilingual text toggle
//!
//! Elements declare their copy in both languages (`data-ru` / `data-en` on the
//! page). Toggling writes the matching annotation into every element that
//! carries both.

use serde::{Deserialize, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "ru")]
    Russian,
    #[serde(alias = "en")]
    English,
}

impl Language {
    /// BCP 47 code, also the annotation suffix
    pub fn code(&self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::English => "en",
        }
    }

    /// Attribute carrying the text in this language
    pub fn attribute(&self) -> String {
        format!("data-{}", self.code())
    }

    pub fn other(&self) -> Self {
        match self {
            Language::Russian => Language::English,
            Language::English => Language::Russian,
        }
    }

    /// Language name in its own tongue
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Russian => "Русский",
            Language::English => "English",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Language::Russian => "🇷🇺",
            Language::English => "🇬🇧",
        }
    }
}

/// An element with per-language text
pub trait Annotated {
    /// Text declared for `language`, if any
    fn annotation(&self, language: Language) -> Option<String>;

    /// Replace the displayed text
    fn set_text(&mut self, text: &str);

    /// Carries text for both languages
    fn is_bilingual(&self) -> bool {
        self.annotation(Language::Russian).is_some() && self.annotation(Language::English).is_some()
    }
}

/// Current language plus the mechanism to re-apply it
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageToggle {
    current: Language,
}

impl LanguageToggle {
    pub fn new(current: Language) -> Self {
        Self { current }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    /// Flip to the other language, returning the new one
    pub fn toggle(&mut self) -> Language {
        self.current = self.current.other();
        self.current
    }

    /// Write the current language's text into every bilingual element.
    /// Returns how many elements were updated.
    pub fn apply<'a, A, I>(&self, elements: I) -> usize
    where
        A: Annotated + 'a,
        I: IntoIterator<Item = &'a mut A>,
    {
        let mut updated = 0;
        for element in elements {
            if !element.is_bilingual() {
                continue;
            }
            if let Some(text) = element.annotation(self.current) {
                element.set_text(&text);
                updated += 1;
            }
        }
        updated
    }

    /// Label and flag of the toggle control: it offers the language you
    /// would switch to
    pub fn control_label(&self) -> (&'static str, &'static str) {
        let target = self.current.other();
        (target.native_name(), target.flag())
    }
}

#[cfg(target_arch = "wasm32")]
impl Annotated for web_sys::Element {
    fn annotation(&self, language: Language) -> Option<String> {
        self.get_attribute(&language.attribute())
    }

    fn set_text(&mut self, text: &str) {
        self.set_text_content(Some(text));
    }
}

#[cfg(target_arch = "wasm32")]
impl LanguageToggle {
    /// Apply the current language to the whole page: `<html lang>`, every
    /// bilingual element (the `<title>` included) and the toggle control
    pub fn apply_to_document(&self, document: &web_sys::Document) {
        use wasm_bindgen::JsCast;

        let code = self.current.code();
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("lang", code);
        }

        let mut elements: Vec<web_sys::Element> = Vec::new();
        if let Ok(nodes) = document.query_selector_all("[data-ru][data-en]") {
            for i in 0..nodes.length() {
                if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into().ok()) {
                    elements.push(el);
                }
            }
        }
        let updated = self.apply(elements.iter_mut());

        let (label, flag) = self.control_label();
        if let Some(el) = document.query_selector(".lang-text").ok().flatten() {
            el.set_text_content(Some(label));
        }
        if let Some(el) = document.query_selector(".flag").ok().flatten() {
            el.set_text_content(Some(flag));
        }

        log::debug!("Applied language '{}' to {} elements", code, updated);
    }
}
