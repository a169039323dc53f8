//! Grading instructions sent ahead of the essay text.

/// Fixed instruction block. The AI is asked for a bare JSON object with
/// exactly the six fields the normalizer reads.
const INSTRUCTIONS: &str = "请作为一名中文写作老师，批改下面这篇中文作文。
请严格按照以下格式输出标准 JSON，不得包含任何多余解释或文本。

### 要求：
1. 语法错误分析（grammarErrors）
2. 流畅度分析（fluencyAnalysis）
3. 逻辑结构评估（logicEvaluation）
4. 写作建议（writingSuggestions）
5. 词汇推荐（vocabularyRecommendations）
6. 综合评分（overallScore，0~100）

### 返回格式：
{
  \"grammarErrors\": [\"错误描述1\", \"错误描述2\"],
  \"fluencyAnalysis\": \"对句子、段落流畅性的评价\",
  \"logicEvaluation\": \"文章结构与论证逻辑评价\",
  \"writingSuggestions\": [\"建议1\", \"建议2\"],
  \"vocabularyRecommendations\": [\"词汇建议1\", \"词汇建议2\"],
  \"overallScore\": 80
}

### 作文内容：
";

/// Build the full prompt for one essay.
pub fn build_prompt(essay: &str) -> String {
    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + essay.len());
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str(essay);
    prompt
}
