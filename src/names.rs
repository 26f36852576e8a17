pub const EXAMS_API_PREFIX: &str = "/api/exams";

pub const ADD_EXAM_URL: &str = "/add";
pub const GET_ALL_EXAMS_URL: &str = "/get-all-exams";
pub const EDIT_EXAM_URL: &str = "/edit-exam-by-id";
pub const ADD_QUESTION_URL: &str = "/add-question-to-exam";
pub const EDIT_QUESTION_URL: &str = "/edit-question-in-exam";
pub const GENERATE_QUIZ_URL: &str = "/generate-quiz";

// Generation defaults
pub const DEFAULT_DIFFICULTY: &str = "medium";
pub const GENERATION_MODEL: &str = "command";
pub const GENERATION_MAX_TOKENS: u32 = 1000;
pub const GENERATION_TEMPERATURE: f64 = 0.7;
pub const PROVIDER_TIMEOUT_SECS: u64 = 60;
