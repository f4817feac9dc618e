//! Static page content rendered by the browser layer.

/// One tile in the skills window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub icon: &'static str,
}

const fn skill(name: &'static str, icon: &'static str) -> Skill {
    Skill { name, icon }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillGroup {
    pub title: &'static str,
    pub skills: &'static [Skill],
}

impl SkillGroup {
    /// Empty tiles appended so every grid row is full.
    pub fn padding(&self) -> usize {
        (GRID_COLUMNS - self.skills.len() % GRID_COLUMNS) % GRID_COLUMNS
    }
}

pub const GRID_COLUMNS: usize = 3;

pub const WINDOW_TITLE: &str = "Technical Skills & Stack";

/// Skill groups by row: three on top, two below.
pub const SKILL_ROWS: [&[SkillGroup]; 2] = [
    &[
        SkillGroup {
            title: "Languages",
            skills: &[
                skill("Python", "/python.png"),
                skill("TypeScript", "/typescript.png"),
                skill("JavaScript", "/js.png"),
                skill("SQL", "/SQL.png"),
                skill("C++", "/C++.png"),
            ],
        },
        SkillGroup {
            title: "Frameworks & Libraries",
            skills: &[
                skill("React", "/react.png"),
                skill("Next.js", "/nextjs.png"),
                skill("Vue.js", "/vuejs.png"),
                skill("Node.js", "/nodejs.png"),
                skill("FastAPI", "/fastAPI.png"),
            ],
        },
        SkillGroup {
            title: "Tools & DevOps",
            skills: &[
                skill("Git", "/git.png"),
                skill("GitHub", "/github.svg"),
                skill("CI/CD", "/githubactions.png"),
                skill("VS Code", "/vscode.png"),
                skill("Postman", "/postman.webp"),
            ],
        },
    ],
    &[
        SkillGroup {
            title: "AI/ML & Data Science",
            skills: &[
                skill("GPT-4", "/gpt4.png"),
                skill("LangChain", "/langchain.webp"),
                skill("Bedrock", "/bedrock.png"),
                skill("PyTorch", "/pytorch.png"),
                skill("TensorFlow", "/tensorflow.png"),
                skill("Pandas", "/pandas.svg"),
                skill("NumPy", "/numpy.png"),
                skill("Scikit-learn", "/Scikitlearnpng.png"),
            ],
        },
        SkillGroup {
            title: "Cloud & Infrastructure",
            skills: &[
                skill("AWS", "/aws.png"),
                skill("Docker", "/docker.png"),
                skill("Kubernetes", "/kubernetes.png"),
                skill("PostgreSQL", "/postgresql.png"),
                skill("MongoDB", "/mongodb.webp"),
                skill("DynamoDB", "/dynamodb.png"),
                skill("S3", "/s3.png"),
            ],
        },
    ],
];

/// Accessible label for navigation dot `index`.
pub fn nav_label(index: usize) -> String {
    format!("Go to section {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_three_then_two() {
        assert_eq!(SKILL_ROWS[0].len(), 3);
        assert_eq!(SKILL_ROWS[1].len(), 2);
    }

    #[test]
    fn grids_pad_to_full_rows() {
        let pads: Vec<usize> = SKILL_ROWS
            .iter()
            .flat_map(|row| row.iter().map(SkillGroup::padding))
            .collect();
        assert_eq!(pads, vec![1, 1, 1, 1, 2]);
        for group in SKILL_ROWS.iter().flat_map(|row| row.iter()) {
            assert_eq!((group.skills.len() + group.padding()) % GRID_COLUMNS, 0);
        }
    }

    #[test]
    fn every_skill_has_an_icon() {
        for group in SKILL_ROWS.iter().flat_map(|row| row.iter()) {
            for skill in group.skills {
                assert!(skill.icon.starts_with('/'), "{}", skill.name);
            }
        }
    }

    #[test]
    fn nav_labels_are_one_based() {
        assert_eq!(nav_label(0), "Go to section 1");
        assert_eq!(nav_label(3), "Go to section 4");
    }
}
