mod forwarding;
