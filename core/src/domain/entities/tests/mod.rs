mod pending_challenge_tests;
