//! Language catalog for the support chat
//!
//! Static lookup from a language code to its display name, the English name
//! used when instructing the provider, the session greeting and the apology
//! shown when the provider cannot be reached. Unknown codes resolve to the
//! default language entry, so lookups never fail.

use crate::error::{Result, WellnessError};
use serde::{Deserialize, Serialize};

/// Code of the base language every catalog falls back to
pub const DEFAULT_LANGUAGE: &str = "en";

/// Apology used when neither the requested nor the default entry carries one
pub const FALLBACK_APOLOGY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again later.";

/// One language known to the chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationEntry {
    /// Short language code (e.g. "hi")
    pub code: String,
    /// Name shown in the language picker, in the language itself
    pub display_name: String,
    /// English name of the language, used in the provider directive
    pub english_name: String,
    /// First bot message of every session in this language
    pub greeting: String,
    /// Apology shown when the provider call fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apology: Option<String>,
}

impl LocalizationEntry {
    /// Create an entry without a localized apology
    ///
    /// # Examples
    ///
    /// ```
    /// use wellness_chat::localization::LocalizationEntry;
    ///
    /// let entry = LocalizationEntry::new("fr", "Français", "French", "Bonjour !");
    /// assert_eq!(entry.code, "fr");
    /// assert!(entry.apology.is_none());
    /// ```
    pub fn new(
        code: impl Into<String>,
        display_name: impl Into<String>,
        english_name: impl Into<String>,
        greeting: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            english_name: english_name.into(),
            greeting: greeting.into(),
            apology: None,
        }
    }

    /// Attach a localized apology and return self for builder use
    pub fn with_apology(mut self, apology: impl Into<String>) -> Self {
        self.apology = Some(apology.into());
        self
    }
}

/// Ordered, lookup-by-code table of [`LocalizationEntry`] values
///
/// Always contains the default language, which is what makes
/// [`LanguageCatalog::resolve`] infallible.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    entries: Vec<LocalizationEntry>,
    default_index: usize,
}

impl LanguageCatalog {
    /// The catalog shipped with the application: English, Hindi, Tamil and Telugu
    ///
    /// # Examples
    ///
    /// ```
    /// use wellness_chat::localization::LanguageCatalog;
    ///
    /// let catalog = LanguageCatalog::builtin();
    /// assert_eq!(catalog.len(), 4);
    /// assert_eq!(catalog.default_code(), "en");
    /// ```
    pub fn builtin() -> Self {
        let entries = vec![
            LocalizationEntry::new(
                "en",
                "English",
                "English",
                "Hello! How can I help you with your wellness today?",
            )
            .with_apology(FALLBACK_APOLOGY),
            LocalizationEntry::new(
                "hi",
                "हिन्दी",
                "Hindi",
                "नमस्ते! मैं आज आपकी सेहत के लिए कैसे मदद कर सकता हूँ?",
            )
            .with_apology(
                "मुझे क्षमा करें, मुझे अभी कनेक्ट होने में समस्या आ रही है। कृपया बाद में दोबारा प्रयास करें।",
            ),
            LocalizationEntry::new(
                "ta",
                "தமிழ்",
                "Tamil",
                "வணக்கம்! இன்று உங்கள் நலவாழ்வுக்கு நான் எப்படி உதவ முடியும்?",
            )
            .with_apology(
                "மன்னிக்கவும், இப்போது இணைப்பதில் சிக்கல் உள்ளது. தயவுசெய்து பின்னர் மீண்டும் முயற்சிக்கவும்.",
            ),
            LocalizationEntry::new(
                "te",
                "తెలుగు",
                "Telugu",
                "నమస్కారం! ఈ రోజు మీ శ్రేయస్సు కోసం నేను ఎలా సహాయపడగలను?",
            )
            .with_apology(
                "క్షమించండి, ప్రస్తుతం కనెక్ట్ అవ్వడంలో సమస్య ఉంది. దయచేసి తర్వాత మళ్లీ ప్రయత్నించండి.",
            ),
        ];

        Self {
            entries,
            default_index: 0,
        }
    }

    /// Build a catalog from explicit entries
    ///
    /// # Errors
    ///
    /// Returns a validation error if an entry is malformed, if two entries
    /// share a code, or if `default_code` is not among the entries.
    pub fn new(entries: Vec<LocalizationEntry>, default_code: &str) -> Result<Self> {
        let mut catalog = Self {
            entries: Vec::with_capacity(entries.len()),
            default_index: 0,
        };
        for entry in entries {
            catalog.add(entry)?;
        }

        catalog.default_index = catalog
            .position(default_code)
            .ok_or_else(|| {
                WellnessError::Validation(format!(
                    "Default language '{}' is not in the catalog",
                    default_code
                ))
            })?;

        Ok(catalog)
    }

    /// Append a new language
    ///
    /// # Errors
    ///
    /// Returns a validation error if the code, names or greeting are blank,
    /// or if the code is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use wellness_chat::localization::{LanguageCatalog, LocalizationEntry};
    ///
    /// let mut catalog = LanguageCatalog::builtin();
    /// catalog
    ///     .add(LocalizationEntry::new("fr", "Français", "French", "Bonjour !"))
    ///     .unwrap();
    /// assert!(catalog.contains("fr"));
    /// assert!(catalog.add(LocalizationEntry::new("fr", "x", "x", "x")).is_err());
    /// ```
    pub fn add(&mut self, entry: LocalizationEntry) -> Result<()> {
        if entry.code.trim().is_empty() {
            return Err(WellnessError::Validation("Language code cannot be empty".to_string()).into());
        }
        if entry.display_name.trim().is_empty() || entry.english_name.trim().is_empty() {
            return Err(WellnessError::Validation(format!(
                "Language '{}' needs a display name and an English name",
                entry.code
            ))
            .into());
        }
        if entry.greeting.trim().is_empty() {
            return Err(WellnessError::Validation(format!(
                "Language '{}' needs a greeting",
                entry.code
            ))
            .into());
        }
        if self.contains(&entry.code) {
            return Err(WellnessError::Validation(format!(
                "Language code must be unique: {}",
                entry.code
            ))
            .into());
        }

        tracing::debug!("Added language {} ({})", entry.code, entry.english_name);
        self.entries.push(entry);
        Ok(())
    }

    /// Look up a language, falling back to the default entry when unknown
    pub fn resolve(&self, code: &str) -> &LocalizationEntry {
        self.get(code).unwrap_or_else(|| self.default_entry())
    }

    /// Look up a language without fallback
    pub fn get(&self, code: &str) -> Option<&LocalizationEntry> {
        self.position(code).map(|i| &self.entries[i])
    }

    /// Whether `code` is a configured language
    pub fn contains(&self, code: &str) -> bool {
        self.position(code).is_some()
    }

    /// Greeting that opens a session in `code`
    pub fn greeting(&self, code: &str) -> &str {
        &self.resolve(code).greeting
    }

    /// English language name for the provider directive
    pub fn language_name(&self, code: &str) -> &str {
        &self.resolve(code).english_name
    }

    /// Apology for a failed provider call
    ///
    /// Entries without their own apology use the default language's.
    pub fn apology(&self, code: &str) -> &str {
        self.resolve(code)
            .apology
            .as_deref()
            .or(self.default_entry().apology.as_deref())
            .unwrap_or(FALLBACK_APOLOGY)
    }

    /// The default language entry
    pub fn default_entry(&self) -> &LocalizationEntry {
        &self.entries[self.default_index]
    }

    /// Code of the default language
    pub fn default_code(&self) -> &str {
        &self.default_entry().code
    }

    /// All entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = &LocalizationEntry> {
        self.entries.iter()
    }

    /// Number of configured languages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries (never true for a constructed catalog)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, code: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.code == code)
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
