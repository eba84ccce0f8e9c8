//! Built-in stage responses used when the completion endpoint is
//! unreachable. Each constant is a complete, valid instance of its stage's
//! answer schema for a small user-account CRUD service, so a fully offline
//! run still produces a coherent project.

/// Offline answer for the requirements stage: a full specification.
pub const REQUIREMENTS_FALLBACK: &str = r####"{
  "title": "User Account API",
  "summary": "A small REST service for creating and managing user accounts.",
  "scope": {
    "in": ["User CRUD over HTTP", "Input validation"],
    "out": ["Authentication", "Persistent storage"]
  },
  "functional_requirements": [
    "Create a user account",
    "List all user accounts",
    "Fetch a user account by id",
    "Update a user account",
    "Delete a user account"
  ],
  "non_functional_requirements": [
    "In-memory storage, no external services",
    "Runnable with a single command"
  ],
  "entities": [
    {
      "name": "User",
      "fields": [
        {"name": "id", "type": "int", "required": true},
        {"name": "name", "type": "str", "required": true},
        {"name": "email", "type": "str", "required": true}
      ]
    }
  ],
  "api_endpoints": [
    {
      "method": "POST",
      "path": "/users",
      "description": "Create a user",
      "request_body_example": {"id": 1, "name": "Ada", "email": "ada@example.com"},
      "response_example": {"id": 1, "name": "Ada", "email": "ada@example.com"}
    },
    {
      "method": "GET",
      "path": "/users",
      "description": "List users",
      "request_body_example": {},
      "response_example": [{"id": 1, "name": "Ada", "email": "ada@example.com"}]
    },
    {
      "method": "GET",
      "path": "/users/{id}",
      "description": "Fetch a user by id",
      "request_body_example": {},
      "response_example": {"id": 1, "name": "Ada", "email": "ada@example.com"}
    },
    {
      "method": "PUT",
      "path": "/users/{id}",
      "description": "Update a user",
      "request_body_example": {"id": 1, "name": "Grace", "email": "grace@example.com"},
      "response_example": {"id": 1, "name": "Grace", "email": "grace@example.com"}
    },
    {
      "method": "DELETE",
      "path": "/users/{id}",
      "description": "Delete a user",
      "request_body_example": {},
      "response_example": {"deleted": 1}
    }
  ],
  "acceptance_criteria_gherkin": [
    {
      "feature": "User management",
      "scenario": "Create a user account",
      "given": ["the service is running"],
      "when": ["a valid user payload is posted to /users"],
      "then": ["the response has status 200", "the created user is returned"]
    },
    {
      "feature": "User management",
      "scenario": "Fetch a missing user",
      "given": ["no user with id 999 exists"],
      "when": ["GET /users/999 is requested"],
      "then": ["the response has status 404"]
    }
  ],
  "tech_choice": {
    "language": "python",
    "framework": "fastapi",
    "test_framework": "pytest"
  }
}"####;

/// Offline answer for the code stage: the application skeleton.
pub const CODE_FALLBACK: &str = r####"{
  "files": [
    {
      "path": "app/main.py",
      "content": "from fastapi import FastAPI\nfrom app.routes import router\n\napp = FastAPI(title='User Account API')\napp.include_router(router)\n"
    },
    {
      "path": "app/models.py",
      "content": "from pydantic import BaseModel\n\n\nclass User(BaseModel):\n    id: int\n    name: str\n    email: str\n"
    },
    {
      "path": "app/storage.py",
      "content": "users = {}\n\n\ndef reset():\n    users.clear()\n"
    },
    {
      "path": "app/routes.py",
      "content": "from fastapi import APIRouter, HTTPException\nfrom app.models import User\nfrom app.storage import users\n\nrouter = APIRouter()\n\n\n@router.post('/users')\ndef create_user(user: User):\n    users[user.id] = user\n    return user\n\n\n@router.get('/users')\ndef list_users():\n    return list(users.values())\n\n\n@router.get('/users/{user_id}')\ndef get_user(user_id: int):\n    if user_id not in users:\n        raise HTTPException(status_code=404, detail='user not found')\n    return users[user_id]\n\n\n@router.put('/users/{user_id}')\ndef update_user(user_id: int, user: User):\n    if user_id not in users:\n        raise HTTPException(status_code=404, detail='user not found')\n    users[user_id] = user\n    return user\n\n\n@router.delete('/users/{user_id}')\ndef delete_user(user_id: int):\n    if user_id not in users:\n        raise HTTPException(status_code=404, detail='user not found')\n    del users[user_id]\n    return {'deleted': user_id}\n"
    },
    {
      "path": "requirements.txt",
      "content": "fastapi\nuvicorn\npydantic\n"
    },
    {
      "path": "README_generated.md",
      "content": "# User Account API\n\nGenerated demo service.\n\n## Run\n\n    pip install -r requirements.txt\n    uvicorn app.main:app --reload\n\n## Test\n\n    pip install pytest httpx\n    pytest\n"
    }
  ]
}"####;

/// Offline answer for the test stage: pytest coverage of the skeleton.
pub const TESTS_FALLBACK: &str = r####"{
  "files": [
    {
      "path": "tests/test_api.py",
      "content": "from fastapi.testclient import TestClient\nfrom app.main import app\nfrom app.storage import users\n\nclient = TestClient(app)\n\n\ndef setup_function():\n    users.clear()\n\n\ndef make_user(uid=1):\n    return {'id': uid, 'name': 'Ada', 'email': 'ada@example.com'}\n\n\ndef test_create_user():\n    r = client.post('/users', json=make_user())\n    assert r.status_code == 200\n    assert r.json()['name'] == 'Ada'\n\n\ndef test_list_users():\n    client.post('/users', json=make_user())\n    client.post('/users', json=make_user(2))\n    r = client.get('/users')\n    assert r.status_code == 200\n    assert len(r.json()) == 2\n\n\ndef test_get_user_by_id():\n    client.post('/users', json=make_user())\n    r = client.get('/users/1')\n    assert r.status_code == 200\n    assert r.json()['id'] == 1\n\n\ndef test_update_user():\n    client.post('/users', json=make_user())\n    updated = {'id': 1, 'name': 'Grace', 'email': 'grace@example.com'}\n    r = client.put('/users/1', json=updated)\n    assert r.status_code == 200\n    assert r.json()['name'] == 'Grace'\n\n\ndef test_delete_user():\n    client.post('/users', json=make_user())\n    r = client.delete('/users/1')\n    assert r.status_code == 200\n    assert client.get('/users/1').status_code == 404\n\n\ndef test_create_user_invalid_payload():\n    r = client.post('/users', json={'id': 'not-an-int'})\n    assert r.status_code == 422\n\n\ndef test_get_missing_user_returns_404():\n    r = client.get('/users/999')\n    assert r.status_code == 404\n"
    }
  ]
}"####;
