use crate::api::{ApiClient, ApiError, InvokeLlmRequest};

use super::utils::{parse_plan, plan_prompt, plan_schema, CalculatorInput, FitnessPlan};

pub async fn generate_plan(
    api: &ApiClient,
    input: &CalculatorInput,
) -> Result<FitnessPlan, ApiError> {
    let metrics = input
        .metrics()
        .ok_or_else(|| ApiError::validation("Fill in weight, height and age first"))?;
    let request = InvokeLlmRequest {
        prompt: plan_prompt(input, &metrics),
        response_json_schema: Some(plan_schema()),
    };
    let raw = api.invoke_llm(&request).await?;
    parse_plan(raw)
}
