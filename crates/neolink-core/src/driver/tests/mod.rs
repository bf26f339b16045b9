mod tests_config;
mod tests_message;
