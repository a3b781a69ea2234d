pub mod analytics_testkit;
