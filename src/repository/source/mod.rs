mod static_data;
