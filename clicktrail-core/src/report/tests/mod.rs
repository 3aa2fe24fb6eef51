mod pairs_report_tests;
