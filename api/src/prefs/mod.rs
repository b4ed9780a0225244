pub mod app_prefs;
