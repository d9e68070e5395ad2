mod memory_otp_store_tests;
