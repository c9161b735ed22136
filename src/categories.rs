//! Keyword-scoring classifier for FAO Gender thematic areas.
//!
//! Every record gets exactly one thematic area. The score of an area is the
//! number of its keywords that occur anywhere in the lowercased title and
//! summary. Areas are scanned in declaration order and only a strictly
//! greater score replaces the current best, so ties resolve to the area
//! declared first. The order of [`THEMATIC_AREAS`] is part of the
//! classification contract.

/// Area used when no keyword matches. It is also the first declared area.
pub const DEFAULT_AREA: &str = "Gender equality and women’s empowerment";

/// Thematic areas in declaration order with their keywords (lowercase).
pub const THEMATIC_AREAS: &[(&str, &[&str])] = &[
    (
        DEFAULT_AREA,
        &[
            "gender equality", "women", "girls", "empower", "empowerment", "leadership", "equity", "inclusion",
            "rights",
        ],
    ),
    (
        "Gender analysis, gender mainstreaming and the project cycle",
        &[
            "gender analysis", "gender mainstreaming", "mainstreaming", "project cycle", "logframe",
            "logical framework", "design phase", "implementation phase", "monitoring and evaluation", "m&e",
        ],
    ),
    (
        "Gender-responsive policy making and budgeting",
        &[
            "policy", "policies", "policy-making", "policy making", "budget", "budgeting",
            "gender-responsive budget", "grb", "governance", "regulation", "legislation",
        ],
    ),
    (
        "Gender statistics and sex-disaggregated data",
        &[
            "sex-disaggregated", "sex disaggregated", "gender statistics", "disaggregated data", "indicator",
            "survey", "census", "data collection", "gender data",
        ],
    ),
    (
        "Gender in fisheries and aquaculture",
        &["fishery", "fisheries", "aquaculture", "fisher", "fishing", "fish value chain"],
    ),
    (
        "Gender in forestry and agroforestry",
        &["forestry", "forest", "agroforestry", "woodlot", "non-timber forest", "ntfp"],
    ),
    (
        "Gender and livestock",
        &[
            "livestock", "pastoral", "pastoralist", "herd", "animal health", "small ruminant", "cattle", "goat",
            "sheep",
        ],
    ),
    (
        "Gender and plant production and protection",
        &[
            "plant production", "crop", "crop production", "plant protection", "ipm", "integrated pest", "seed",
            "agronomy", "plant health",
        ],
    ),
    (
        "Gender and innovative and labour-saving technologies",
        &[
            "innovation", "innovative", "technology", "technologies", "labour-saving", "labor-saving",
            "mechanization", "mechanisation", "tools", "equipment", "digital",
        ],
    ),
    (
        "Gender and land and water",
        &[
            "land tenure", "land rights", "land", "water", "irrigation", "watershed", "water management",
            "land governance",
        ],
    ),
    (
        "Gender and food security and nutrition",
        &[
            "food security", "nutrition", "malnutrition", "diet", "food systems", "household food", "nutritious",
        ],
    ),
    (
        "Gender and inclusive food systems and value chains",
        &[
            "inclusive", "value chain", "market access", "agrifood", "food system", "processing", "marketing",
            "inclusive business",
        ],
    ),
    (
        "Gender and climate change, agroecology and biodiversity",
        &[
            "climate", "climate change", "agroecology", "biodiversity", "mitigation", "adaptation", "emissions",
            "ecosystem", "nature-based",
        ],
    ),
    (
        "Gender and emergencies and resilience building",
        &[
            "emergency", "humanitarian", "crisis", "conflict", "resilience", "shock", "disaster", "drm",
            "risk management",
        ],
    ),
    (
        "Gender-based violence and protection from sexual exploitation and abuse",
        &[
            "gender-based violence", "gbv", "violence", "protection from sexual exploitation and abuse", "psea",
            "harassment", "safeguarding",
        ],
    ),
    (
        "Gender and rural financial services",
        &["finance", "financial services", "microfinance", "credit", "loans", "savings", "remittances"],
    ),
    (
        "Gender and decent rural employment and child labour",
        &[
            "decent work", "decent employment", "rural employment", "child labour", "child labor",
            "occupational safety", "oshea", "youth employment",
        ],
    ),
    (
        "Gender and investment in sustainable agrifood systems",
        &[
            "investment", "invest", "sustainable agrifood", "infrastructure", "capital", "financing",
            "public investment", "private investment",
        ],
    ),
    (
        "Gender and rural advisory services",
        &[
            "extension", "advisory services", "rural advisory", "farmer field school", "ffs",
            "capacity development", "training",
        ],
    ),
    (
        "Gender-sensitive social protection",
        &["social protection", "cash transfer", "safety net", "social assistance", "insurance", "public works"],
    ),
];

/// Pick the best-scoring thematic area for a title and summary.
///
/// Pure and deterministic. Falls back to [`DEFAULT_AREA`] when nothing scores.
pub fn categorize(title: &str, summary: &str) -> &'static str {
    let text = format!("{title} {summary}")
        .to_lowercase()
        .replace('\u{2019}', "'")
        .replace(['\u{201C}', '\u{201D}'], "\"");

    let mut best = DEFAULT_AREA;
    let mut best_score = 0;
    for (area, keywords) in THEMATIC_AREAS {
        let score = keywords.iter().filter(|keyword| text.contains(**keyword)).count();
        if score > best_score {
            best_score = score;
            best = *area;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_shape() {
        assert_eq!(THEMATIC_AREAS.len(), 20);
        assert_eq!(THEMATIC_AREAS[0].0, DEFAULT_AREA);
        for (area, keywords) in THEMATIC_AREAS {
            assert!(!keywords.is_empty(), "{area} has no keywords");
            for keyword in *keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn test_no_match_uses_default() {
        assert_eq!(categorize("", ""), DEFAULT_AREA);
        assert_eq!(categorize("Quarterly report", "Nothing relevant here"), DEFAULT_AREA);
    }

    #[test]
    fn test_tie_keeps_first_declared() {
        // One keyword each for the first and third areas.
        assert_eq!(categorize("Policy", "women"), DEFAULT_AREA);
        // One keyword each for fisheries and forestry; fisheries is declared first.
        assert_eq!(
            categorize("Aquaculture", "and woodlots"),
            "Gender in fisheries and aquaculture"
        );
    }

    #[test]
    fn test_strictly_greater_score_wins() {
        let area = categorize(
            "New policy on budget governance",
            "Women call for legislation",
        );
        assert_eq!(area, "Gender-responsive policy making and budgeting");
    }

    #[test]
    fn test_score_counts_keywords_not_occurrences() {
        // "women" three times still scores 1; two distinct fisheries keywords score 2.
        let area = categorize("Women, women, women", "fishing and aquaculture");
        assert_eq!(area, "Gender in fisheries and aquaculture");
    }

    #[test]
    fn test_case_and_curly_quotes_are_normalized() {
        assert_eq!(
            categorize("CLIMATE CHANGE and BIODIVERSITY", ""),
            "Gender and climate change, agroecology and biodiversity"
        );
        assert_eq!(
            categorize("“Cash transfer” schemes", "a safety net for households"),
            "Gender-sensitive social protection"
        );
    }

    #[test]
    fn test_deterministic() {
        let title = "Livestock herders adapt to drought";
        let summary = "Pastoralist women in the Sahel";
        assert_eq!(categorize(title, summary), categorize(title, summary));
    }
}
