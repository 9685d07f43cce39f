mod mod_errors;
mod mod_logger;
