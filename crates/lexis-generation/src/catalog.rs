//! The static health-topic catalog generation runs draw from.
//!
//! Each entry maps a stable category key to the topic description handed to
//! the generation prompt. Context text is optional per key and loaded from
//! the operator's context directory (`<key>.txt`), never baked in.

use std::collections::HashMap;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct CategoryEntry {
    pub key: &'static str,
    pub description: &'static str,
}

const BUILTIN: &[CategoryEntry] = &[
    CategoryEntry {
        key: "symptoms_general",
        description: "General systemic symptoms (fatigue, malaise, weakness, weight changes, appetite changes, night sweats)",
    },
    CategoryEntry {
        key: "symptoms_fever_temperature",
        description: "Fever, high temperature, hypothermia, chills, shivering",
    },
    CategoryEntry {
        key: "symptoms_respiratory_upper",
        description: "Upper respiratory symptoms (runny nose, nasal congestion, sneezing, sore throat, hoarseness)",
    },
    CategoryEntry {
        key: "symptoms_respiratory_lower",
        description: "Lower respiratory symptoms (dry or productive cough, shortness of breath, wheezing, chest tightness)",
    },
    CategoryEntry {
        key: "symptoms_gastrointestinal_upper",
        description: "Upper GI symptoms (nausea, vomiting, heartburn, indigestion, difficulty swallowing)",
    },
    CategoryEntry {
        key: "symptoms_gastrointestinal_lower",
        description: "Lower GI symptoms (diarrhea, constipation, abdominal pain, bloating, rectal bleeding, jaundice)",
    },
    CategoryEntry {
        key: "symptoms_neurological",
        description: "Neurological symptoms (headache, migraine, dizziness, confusion, seizures, tremors, numbness, loss of smell or taste)",
    },
    CategoryEntry {
        key: "symptoms_musculoskeletal",
        description: "Musculoskeletal symptoms (muscle aches, joint pain, back pain, stiffness, cramps)",
    },
    CategoryEntry {
        key: "symptoms_skin_integumentary",
        description: "Skin symptoms (rash, hives, itching, lesions, blisters, discoloration, hair loss)",
    },
    CategoryEntry {
        key: "disease_covid19",
        description: "COVID-19, variants, Long COVID",
    },
    CategoryEntry {
        key: "disease_influenza_seasonal",
        description: "Seasonal influenza, strains (H1N1, H3N2, B)",
    },
    CategoryEntry {
        key: "disease_measles",
        description: "Measles virus, outbreaks, complications",
    },
    CategoryEntry {
        key: "disease_tuberculosis",
        description: "Tuberculosis, pulmonary and extrapulmonary, drug-resistant TB",
    },
    CategoryEntry {
        key: "disease_norovirus",
        description: "Norovirus, acute gastroenteritis, stomach flu",
    },
    CategoryEntry {
        key: "disease_dengue",
        description: "Dengue fever, mosquito-borne transmission",
    },
    CategoryEntry {
        key: "disease_rabies",
        description: "Rabies, animal bites",
    },
    CategoryEntry {
        key: "transmission_foodborne",
        description: "Illnesses caused by contaminated food",
    },
    CategoryEntry {
        key: "transmission_waterborne",
        description: "Illnesses caused by contaminated water",
    },
    CategoryEntry {
        key: "public_health_vaccination_general",
        description: "General discussions about vaccines, immunization schedules, importance of vaccination",
    },
    CategoryEntry {
        key: "public_health_misinformation_disinformation",
        description: "Spread of false or misleading health information, fact-checking, rumors",
    },
    CategoryEntry {
        key: "health_system_capacity_hospitals",
        description: "Hospital bed availability, emergency room overcrowding, wait times",
    },
    CategoryEntry {
        key: "env_air_quality",
        description: "Air pollution concerns, smog, impact on respiratory health",
    },
    CategoryEntry {
        key: "mental_health_symptoms_anxiety",
        description: "Anxiety, worry, nervousness, panic attacks",
    },
    CategoryEntry {
        key: "emerging_unexplained_clusters",
        description: "Reports of unusual clusters of illness or symptoms without a clear cause",
    },
];

/// Category key → topic description, plus per-key context text when the
/// operator provides it.
pub struct CategoryCatalog {
    entries: &'static [CategoryEntry],
    contexts: HashMap<String, String>,
}

impl CategoryCatalog {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN,
            contexts: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CategoryEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Uniformly random entry; `None` only for an empty catalog.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&CategoryEntry> {
        self.entries.choose(rng)
    }

    pub fn context(&self, key: &str) -> Option<&str> {
        self.contexts.get(key).map(String::as_str)
    }

    pub fn set_context(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.contexts.insert(key.into(), text.into());
    }

    /// Load `<key>.txt` context files from a directory. Missing files are
    /// normal; unreadable or empty ones are skipped with a warning. Returns
    /// how many contexts were loaded.
    pub fn load_context_dir(&mut self, dir: &Path) -> usize {
        let mut loaded = 0;
        for entry in self.entries {
            let path = dir.join(format!("{}.txt", entry.key));
            if !path.exists() {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        tracing::warn!(key = entry.key, "context file is empty, skipping");
                        continue;
                    }
                    self.contexts.insert(entry.key.to_string(), text.to_string());
                    loaded += 1;
                }
                Err(e) => {
                    tracing::warn!(key = entry.key, error = %e, "failed to read context file");
                }
            }
        }
        loaded
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
