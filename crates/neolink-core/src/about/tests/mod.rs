mod tests_compat;
