use serde::Serialize;

/// Category coefficients, in the fixed order
/// participation, readings, labs, exercises, projects, midterm, final.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Weights {
    pub participation: f64,
    pub readings: f64,
    pub labs: f64,
    pub exercises: f64,
    pub projects: f64,
    pub midterm: f64,
    pub final_exam: f64,
}

impl Weights {
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.participation,
            self.readings,
            self.labs,
            self.exercises,
            self.projects,
            self.midterm,
            self.final_exam,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

impl From<[f64; 7]> for Weights {
    fn from(w: [f64; 7]) -> Self {
        Weights {
            participation: w[0],
            readings: w[1],
            labs: w[2],
            exercises: w[3],
            projects: w[4],
            midterm: w[5],
            final_exam: w[6],
        }
    }
}

/// One student's identity, raw scores and category weights.
///
/// Derived values (averages, total, letter) live in `grading` and are
/// recomputed from the current state on every call.
#[derive(Debug, Clone, Default)]
pub struct GradeRecord {
    name: String,
    student_id: String,
    participation: f64,
    midterm: f64,
    final_exam: f64,
    readings: Vec<f64>,
    labs: Vec<f64>,
    exercises: Vec<f64>,
    projects: Vec<f64>,
    weights: Weights,
}

impl GradeRecord {
    pub fn new(name: impl Into<String>, student_id: impl Into<String>, weights: Weights) -> Self {
        GradeRecord {
            name: name.into(),
            student_id: student_id.into(),
            weights,
            ..Default::default()
        }
    }

    pub fn add_reading(&mut self, score: f64) {
        self.readings.push(score);
    }

    pub fn add_lab(&mut self, score: f64) {
        self.labs.push(score);
    }

    pub fn add_exercise(&mut self, score: f64) {
        self.exercises.push(score);
    }

    pub fn add_project(&mut self, score: f64) {
        self.projects.push(score);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_student_id(&mut self, student_id: impl Into<String>) {
        self.student_id = student_id.into();
    }

    pub fn set_participation(&mut self, score: f64) {
        self.participation = score;
    }

    pub fn set_midterm(&mut self, score: f64) {
        self.midterm = score;
    }

    pub fn set_final_exam(&mut self, score: f64) {
        self.final_exam = score;
    }

    pub fn set_weights(&mut self, weights: Weights) {
        self.weights = weights;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn participation(&self) -> f64 {
        self.participation
    }

    pub fn midterm(&self) -> f64 {
        self.midterm
    }

    pub fn final_exam(&self) -> f64 {
        self.final_exam
    }

    pub fn readings(&self) -> &[f64] {
        &self.readings
    }

    pub fn labs(&self) -> &[f64] {
        &self.labs
    }

    pub fn exercises(&self) -> &[f64] {
        &self.exercises
    }

    pub fn projects(&self) -> &[f64] {
        &self.projects
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }
}

/// One row of a cohort summary: who, and what they scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSummary {
    pub name: String,
    pub student_id: String,
    pub total: f64,
    pub letter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterCount {
    pub letter: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortSummary {
    pub count: usize,
    pub highest: Option<RecordSummary>,
    pub median: Option<RecordSummary>,
    pub lowest: Option<RecordSummary>,
    pub average: f64,
    pub distribution: Vec<LetterCount>,
}
