mod session_tests;
mod tool_tests;
