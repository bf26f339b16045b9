mod tests_subgraph;
