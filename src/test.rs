mod camellia;
