//! Built-in question texts for the two analyses the service knows about.

use crate::domain::ports::QuestionSource;

pub const COURT_MOST_CASES_KEY: &str =
    "Which high court disposed the most cases from 2019 - 2022?";
pub const COURT_DELAY_SLOPE_KEY: &str =
    "What's the regression slope of the date_of_registration - decision_date by year in the court=33_10?";
pub const COURT_DELAY_PLOT_KEY: &str = "Plot the year and # of days of delay from the above question as a scatterplot with a regression line. Encode as a base64 data URI under 100,000 characters";

pub const COURT_QUESTION_KEYS: [&str; 3] = [
    COURT_MOST_CASES_KEY,
    COURT_DELAY_SLOPE_KEY,
    COURT_DELAY_PLOT_KEY,
];

pub const FILMS_QUESTION: &str = r#"Scrape the list of highest grossing films from Wikipedia. It is at the URL:
https://en.wikipedia.org/wiki/List_of_highest-grossing_films

Answer the following questions and respond with a JSON array of strings containing the answer.

1. How many $2 bn movies were released before 2020?
2. Which is the earliest film that grossed over $1.5 bn?
3. What's the correlation between the Rank and Peak?
4. Draw a scatterplot of Rank and Peak along with a dotted red regression line through it.
   Return as a base-64 encoded data URI, `"data:image/png;base64,iVBORw0KG..."` under 100,000 bytes.
"#;

const COURT_PREAMBLE: &str = r#"The Indian high court judgement dataset contains judgements from the Indian High Courts, downloaded from [ecourts website](https://judgments.ecourts.gov.in/). It contains judgments of 25 high courts, along with raw metadata (as .json) and structured metadata (as .parquet).

- 25 high courts
- ~16M judgments
- ~1TB of data

Structure of the data in the bucket:

- `data/pdf/year=2025/court=xyz/bench=xyz/judgment1.pdf,judgment2.pdf`
- `metadata/json/year=2025/court=xyz/bench=xyz/judgment1.json,judgment2.json`
- `metadata/parquet/year=2025/court=xyz/bench=xyz/metadata.parquet`
- `metadata/tar/year=2025/court=xyz/bench=xyz/metadata.tar.gz`
- `data/tar/year=2025/court=xyz/bench=xyz/pdfs.tar`

This DuckDB query counts the number of decisions in the dataset.

```sql
INSTALL httpfs; LOAD httpfs;
INSTALL parquet; LOAD parquet;

SELECT COUNT(*) FROM read_parquet('s3://indian-high-court-judgments/metadata/parquet/year=*/court=*/bench=*/metadata.parquet?s3_region=ap-south-1');
```

Columns: court_code, title, description, judge, pdf_link, cnr, date_of_registration, decision_date, disposal_nature, court, raw_html, bench, year.

Answer the following questions and respond with a JSON object containing the answer.
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum QuestionPreset {
    Films,
    Court,
}

impl QuestionPreset {
    pub fn file_name(&self) -> &'static str {
        match self {
            QuestionPreset::Films => "question.txt",
            QuestionPreset::Court => "court_question.txt",
        }
    }

    pub fn text(&self) -> String {
        match self {
            QuestionPreset::Films => FILMS_QUESTION.to_string(),
            QuestionPreset::Court => {
                let mut text = String::from(COURT_PREAMBLE);
                text.push_str("\n{\n");
                let lines: Vec<String> = COURT_QUESTION_KEYS
                    .iter()
                    .map(|key| {
                        let placeholder = if *key == COURT_DELAY_PLOT_KEY {
                            "data:image/webp:base64,..."
                        } else {
                            "..."
                        };
                        format!("  \"{}\": \"{}\"", key, placeholder)
                    })
                    .collect();
                text.push_str(&lines.join(",\n"));
                text.push_str("\n}\n");
                text
            }
        }
    }

    pub fn source(&self) -> QuestionSource {
        QuestionSource::Inline {
            name: self.file_name().to_string(),
            text: self.text(),
        }
    }
}
