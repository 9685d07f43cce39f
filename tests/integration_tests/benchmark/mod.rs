mod mod_scripts;
