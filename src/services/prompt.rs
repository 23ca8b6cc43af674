//! 评分提示词构建

use crate::models::GradingJob;

/// 系统消息
pub const GRADING_SYSTEM_MESSAGE: &str =
    "You are an expert academic grader. Always respond with valid JSON format as requested.";

/// 回复格式约定，字段名与规范化器读取的字段一致
const JSON_FORMAT: &str = r#"JSON FORMAT:
{
    "total_score": <numerical score out of total marks>,
    "percentage": <percentage score>,
    "overall_feedback": "<comprehensive feedback explaining the grade>",
    "strengths": ["<list of strengths identified>"],
    "areas_for_improvement": ["<list of areas needing improvement>"],
    "criteria_scores": {
        "<criterion_name>": <score for this criterion>
    },
    "questions": [
        {
            "question_number": <number>,
            "question_text": "<brief description of the question>",
            "attempted": <true if the student answered this question, otherwise false>,
            "score": <score for this question>,
            "max_score": <maximum possible score>,
            "feedback": "<specific feedback for this question>"
        }
    ],
    "grade_justification": "<detailed explanation of how the grade was determined>"
}
"#;

/// 构建评分提示词
///
/// 包含 JSON 格式约定、总分、自定义评分标准、附加说明和多题识别说明，最后附上提交原文
pub fn build_grading_prompt(text_content: &str, job: &GradingJob) -> String {
    let mut prompt = String::from(
        "You are an API, not a human.\n\n\
         Return ONLY valid JSON.\n\
         Do NOT add explanations.\n\
         Do NOT add markdown.\n\
         Do NOT add text before or after JSON.\n\n",
    );

    prompt.push_str(JSON_FORMAT);
    prompt.push_str(&format!(
        "\nGRADING PARAMETERS:\n- Total Marks Available: {}\n- Detect Multiple Questions: {}\n\n",
        job.total_marks, job.detect_multiple_questions
    ));

    if !job.criteria.is_empty() {
        prompt.push_str("CUSTOM GRADING CRITERIA (STRICT REQUIREMENTS):\n");
        for (criterion, marks) in &job.criteria {
            prompt.push_str(&format!(
                "- {}: {} marks (ONLY award if this requirement is clearly met)\n",
                criterion, marks
            ));
        }
        prompt.push_str(
            "\nIMPORTANT: You must check each criterion carefully. If a criterion requires code \
             and there is NO CODE in the submission, award 0 marks for that criterion. \
             Be strict and precise.\n\n",
        );
    }

    if !job.additional_instructions.trim().is_empty() {
        prompt.push_str(&format!(
            "ADDITIONAL GRADING INSTRUCTIONS:\n{}\n\n",
            job.additional_instructions.trim()
        ));
    }

    if job.detect_multiple_questions {
        prompt.push_str(
            "MULTIPLE QUESTIONS DETECTION:\n\
             Please identify if there are multiple distinct questions or parts in this submission. \
             If so, grade each question/part separately.\n\n",
        );
    }

    prompt.push_str(&format!("Student submission:\n{}\n", text_content));
    prompt
}
