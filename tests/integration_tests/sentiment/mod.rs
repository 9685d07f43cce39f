mod mod_pipeline;
