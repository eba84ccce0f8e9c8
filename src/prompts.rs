/// Prompt for the requirements stage.
/// Placeholders: `{user_story}`.
pub const REQUIREMENTS_PROMPT: &str = r####"Transform this user story into a clear, structured software specification.

USER STORY:
{user_story}

Return JSON with this schema:

{
  "title": "short title",
  "summary": "1-3 sentences",
  "scope": {
    "in": ["..."],
    "out": ["..."]
  },
  "functional_requirements": ["..."],
  "non_functional_requirements": ["..."],
  "entities": [
    {
      "name": "EntityName",
      "fields": [{"name": "id", "type": "str/int", "required": true}]
    }
  ],
  "api_endpoints": [
    {
      "method": "GET/POST/PUT/DELETE",
      "path": "/...",
      "description": "...",
      "request_body_example": {},
      "response_example": {}
    }
  ],
  "acceptance_criteria_gherkin": [
    {
      "feature": "...",
      "scenario": "...",
      "given": ["..."],
      "when": ["..."],
      "then": ["..."]
    }
  ],
  "tech_choice": {
    "language": "python",
    "framework": "fastapi",
    "test_framework": "pytest"
  }
}

Rules:
1. Keep it implementable in a small demo.
2. Prefer simple CRUD with in-memory storage or SQLite.
3. Provide at least 3 endpoints (CRUD).
"####;

/// Prompt for the code stage.
/// Placeholders: `{spec_json}`.
pub const CODE_PROMPT: &str = r####"You are generating a small but clean codebase for the given specification.

SPEC JSON:
{spec_json}

Generate a minimal FastAPI project with:
- app/main.py (FastAPI app)
- app/models.py (Pydantic models)
- app/storage.py (in-memory storage, or SQLite if very simple)
- app/routes.py (API routes)
- requirements.txt
- README_generated.md (how to run)

Constraints:
1. Keep it simple and runnable.
2. Use Pydantic models.
3. Provide CRUD for the main entity.
4. Code must be complete, no placeholders like TODO.
5. Return a JSON object: { "files": [{"path": "...", "content": "..."}, ...] }
"####;

/// Prompt for the test stage.
/// Placeholders: `{spec_json}`, `{key_files_json}`.
pub const TEST_PROMPT: &str = r####"Generate pytest tests for a FastAPI app following this specification.

SPEC:
{spec_json}

KEY CODE FILES (for context):
{key_files_json}

Requirements:
1. Use fastapi.testclient.TestClient.
2. Create tests for: create, read list, read by id, update, delete.
3. Include at least 2 edge cases (invalid payload, missing id, etc.).
4. Put test files under tests/ (e.g. tests/test_api.py).
5. Return a JSON object: { "files": [{"path": "tests/test_api.py", "content": "..."}, ...] }
"####;

/// Appended to every stage prompt so the answer parses without recovery.
pub const JSON_OBJECT_DIRECTIVE: &str = "Return ONLY the JSON object, no markdown code fences, no explanation. The output must be valid JSON that can be parsed directly.";
