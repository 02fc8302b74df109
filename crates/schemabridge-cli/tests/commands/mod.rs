mod decode_test;
mod encode_test;
