mod shutdown_tests;
